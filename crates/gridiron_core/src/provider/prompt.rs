//! Prompt text for the model caller

use schemars::schema_for;

use super::{PlayRequest, ProviderConfig};
use crate::models::{Team, WaypointPlay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const ROLE: &str = r#"You are the play-by-play engine of an American football game.
Given the offensive and defensive calls and the game situation, decide what
happens on the next snap and describe it for the animation system.

Field: x is lateral (-26.6 to 26.6), z is downfield from the line of
scrimmage (positive toward the goal the offense attacks), y is height.
Units are yards. Headings are radians, 0 facing downfield.
Player ids are off_1..off_11 and def_1..def_11.
Outcomes: touchdown, tackle, incomplete, interception, turnover.
Animations: idle, sprint, backpedal, throw, catch, tackle, fall, block.
Keep yardsGained consistent with the ball's final position."#;

const COMPACT_GRAMMAR: &str = r#"Reply with ONE line in this compact form, nothing else:

HEADER|BALL|PLAYERS|EVENTS|SUMMARY

HEADER   outcome code + duration in whole seconds (base 36) + ':' + yards gained (base 36, '-' if negative)
         codes: T touchdown, K tackle, I incomplete, P interception, F turnover
BALL     x,y,z~x,y,z~...           each number in tenths of a yard, base 36
PLAYERS  id:x,z,deg,a~x,z,deg,a;id:...
         x,z in tenths (base 36), deg = heading in whole degrees (base 36),
         a = i idle, s sprint, b backpedal, t throw, c catch, k tackle, f fall, l block
EVENTS   comma-separated event names (snap, handoff, throw, catch, tackle, ...)
SUMMARY  one or two sentences of commentary

Example: K8:6|0,f,0~0,f,3c|off_21:0,-1e,0,s~0,3c,0,f|snap,handoff,tackle|Up the middle for 6."#;

/// JSON schema of the waypoint reply
pub fn waypoint_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(WaypointPlay)).unwrap_or_default()
}

pub fn build_prompt(request: &PlayRequest, config: &ProviderConfig) -> Prompt {
    let format = if config.use_compact_encoding {
        COMPACT_GRAMMAR.to_string()
    } else {
        let schema = serde_json::to_string_pretty(&waypoint_schema()).unwrap_or_default();
        format!("Reply with a single JSON object matching this schema, no prose:\n{schema}")
    };

    Prompt { system: format!("{ROLE}\n\n{format}"), user: situation(request) }
}

fn situation(request: &PlayRequest) -> String {
    let state = &request.state;
    let offense = state.possession;
    let mut lines = vec![
        format!(
            "{} ball, {}, {}",
            team_name(offense),
            state.down_and_distance(),
            state.clock_text()
        ),
        format!(
            "Score: {} {} - {} {}",
            team_name(offense),
            state.score_for(offense),
            team_name(offense.opponent()),
            state.score_for(offense.opponent())
        ),
        format!("Offense calls: {}", request.offense_play),
        format!("Defense calls: {}", request.defense_play),
    ];

    if !request.history.is_empty() {
        lines.push("Recent plays:".to_string());
        lines.extend(request.history.iter().map(|h| format!("- {h}")));
    }
    lines.join("\n")
}

fn team_name(team: Team) -> &'static str {
    match team {
        Team::Home => "Home",
        Team::Away => "Away",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_play;
    use crate::state::MatchState;

    fn request(history: Vec<String>) -> PlayRequest {
        PlayRequest {
            offense_play: "PA Boot".into(),
            defense_play: "Cover 3".into(),
            history,
            state: MatchState::new(),
        }
    }

    #[test]
    fn test_json_prompt_embeds_schema() {
        let prompt = build_prompt(&request(vec![]), &ProviderConfig::default());
        assert!(prompt.system.contains("\"ballPath\""));
        assert!(prompt.system.contains("\"playerPaths\""));
        assert!(!prompt.system.contains("HEADER|BALL"));
    }

    #[test]
    fn test_compact_prompt_uses_grammar() {
        let cfg = ProviderConfig { use_compact_encoding: true, ..ProviderConfig::default() };
        let prompt = build_prompt(&request(vec![]), &cfg);
        assert!(prompt.system.contains("HEADER|BALL|PLAYERS|EVENTS|SUMMARY"));
        assert!(!prompt.system.contains("\"ballPath\""));
    }

    #[test]
    fn test_compact_grammar_example_decodes() {
        let example = COMPACT_GRAMMAR
            .lines()
            .find_map(|l| l.strip_prefix("Example: "))
            .unwrap();
        let play = decode_play(example).unwrap();
        assert_eq!(play.yards_gained, 6);
        assert_eq!(play.time_elapsed, 8.0);
        assert_eq!(play.player_paths[0].waypoints.len(), 2);
    }

    #[test]
    fn test_user_prompt_situation() {
        let prompt = build_prompt(
            &request(vec!["Dive vs Blitz: Stuffed".into(), "Slant vs Cover 2: Gain of 8".into()]),
            &ProviderConfig::default(),
        );
        assert_eq!(
            prompt.user,
            "Home ball, 1st & 10 at midfield, Q1 5:00\n\
             Score: Home 0 - Away 0\n\
             Offense calls: PA Boot\n\
             Defense calls: Cover 3\n\
             Recent plays:\n\
             - Dive vs Blitz: Stuffed\n\
             - Slant vs Cover 2: Gain of 8"
        );
    }

    #[test]
    fn test_schema_accepts_sample_reply() {
        let schema = waypoint_schema();
        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
        let reply = serde_json::json!({
            "outcome": "tackle",
            "yardsGained": 4,
            "timeElapsed": 6.0,
            "summary": "Run for 4",
            "ballPath": [[0.0, 1.0, 0.0], [0.0, 1.0, 4.0]],
            "playerPaths": [
                {"id": "off_21", "waypoints": [{"x": 0.0, "z": -1.0, "rotation": 0.0, "animation": "sprint"}]}
            ],
            "events": ["snap"]
        });
        assert!(compiled.is_valid(&reply));

        let bad = serde_json::json!({"outcome": "punt", "ballPath": []});
        assert!(!compiled.is_valid(&bad));
    }
}
