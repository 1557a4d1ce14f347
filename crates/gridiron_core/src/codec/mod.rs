//! Compact wire form for waypoint plays
//!
//! Asking a model for a short token string instead of verbose JSON cuts
//! output length (and truncation) considerably. Layout:
//!
//! ```text
//! HEADER|BALL|PLAYERS|EVENTS|SUMMARY
//!
//! HEADER   outcome code + whole-second duration (base 36) + ':' + yards (base 36)
//! BALL     x,y,z~x,y,z~...                 coordinates in tenths, base 36
//! PLAYERS  id:x,z,deg,a~x,z,deg,a;id:...   deg = whole degrees, a = animation code
//! EVENTS   snap,catch,...
//! SUMMARY  free text, may itself contain '|'
//! ```
//!
//! Outcome codes: T touchdown, K tackle, I incomplete, P interception,
//! F turnover. Animation codes: i s b t c k f l (idle, sprint, backpedal,
//! throw, catch, tackle, fall, block).

pub mod base36;

use crate::engine::angles::{from_degrees, to_whole_degrees};
use crate::error::CodecError;
use crate::models::{Animation, Outcome, PlayerPath, Waypoint, WaypointPlay};

const SECTION_SEP: char = '|';
const POINT_SEP: char = '~';
const FIELD_SEP: char = ',';
const PLAYER_SEP: char = ';';
const ID_SEP: char = ':';

const ID_RESERVED: [char; 5] = [SECTION_SEP, POINT_SEP, FIELD_SEP, PLAYER_SEP, ID_SEP];
const EVENT_RESERVED: [char; 2] = [SECTION_SEP, FIELD_SEP];

pub fn encode_play(play: &WaypointPlay) -> Result<String, CodecError> {
    let header = format!(
        "{}{}{}{}",
        play.outcome.code(),
        base36::encode(play.time_elapsed.max(0.0).round() as i64),
        ID_SEP,
        base36::encode(play.yards_gained as i64)
    );

    let ball = play
        .ball_path
        .iter()
        .map(|p| p.iter().map(|v| base36::encode_tenths(*v)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("~");

    let players = play
        .player_paths
        .iter()
        .map(encode_player)
        .collect::<Result<Vec<_>, _>>()?
        .join(";");

    for event in &play.events {
        if !is_encodable_token(event) || event.contains(EVENT_RESERVED) {
            return Err(CodecError::ReservedCharacter { field: "event", value: event.clone() });
        }
    }
    let events = play.events.join(",");

    Ok([header, ball, players, events, play.summary.clone()].join("|"))
}

/// Decoding trims ids and events, so padded or blank ones cannot come back
/// unchanged.
fn is_encodable_token(token: &str) -> bool {
    !token.is_empty() && token.trim() == token
}

fn encode_player(path: &PlayerPath) -> Result<String, CodecError> {
    if !is_encodable_token(&path.id) || path.id.contains(ID_RESERVED) {
        return Err(CodecError::ReservedCharacter { field: "player id", value: path.id.clone() });
    }
    let waypoints = path
        .waypoints
        .iter()
        .map(|w| {
            format!(
                "{},{},{},{}",
                base36::encode_tenths(w.x),
                base36::encode_tenths(w.z),
                base36::encode(to_whole_degrees(w.rotation) as i64),
                w.animation.code()
            )
        })
        .collect::<Vec<_>>()
        .join("~");
    Ok(format!("{}{}{}", path.id, ID_SEP, waypoints))
}

pub fn decode_play(text: &str) -> Result<WaypointPlay, CodecError> {
    let sections: Vec<&str> = text.trim_start().splitn(5, SECTION_SEP).collect();
    if sections.len() != 5 {
        return Err(CodecError::SectionCount { found: sections.len() });
    }

    let (outcome, time_elapsed, yards_gained) = decode_header(sections[0].trim())?;
    let ball_path = non_empty(sections[1], POINT_SEP).map(decode_ball_point).collect::<Result<_, _>>()?;
    let player_paths =
        non_empty(sections[2], PLAYER_SEP).map(decode_player).collect::<Result<_, _>>()?;
    let events = non_empty(sections[3], FIELD_SEP).map(|e| e.trim().to_string()).collect();

    Ok(WaypointPlay {
        outcome,
        yards_gained,
        time_elapsed,
        summary: sections[4].trim_end_matches(['\r', '\n']).to_string(),
        ball_path,
        player_paths,
        events,
    })
}

fn non_empty(section: &str, sep: char) -> impl Iterator<Item = &str> {
    section.split(sep).filter(|s| !s.trim().is_empty())
}

fn decode_header(header: &str) -> Result<(Outcome, f32, i32), CodecError> {
    let mut chars = header.chars();
    let code = chars.next().ok_or(CodecError::EmptyHeader)?;
    let outcome = Outcome::from_code(code.to_ascii_uppercase())
        .ok_or(CodecError::UnknownOutcomeCode(code))?;

    let rest = chars.as_str();
    let (duration, yards) = match rest.split_once(ID_SEP) {
        Some((d, y)) => (d, Some(y)),
        None => (rest, None),
    };
    let duration = base36::decode(duration)?;
    let yards = match yards {
        Some(y) => base36::decode(y)?,
        None => 0,
    };
    Ok((outcome, duration as f32, yards as i32))
}

fn decode_ball_point(entry: &str) -> Result<[f32; 3], CodecError> {
    let parts: Vec<&str> = entry.trim().split(FIELD_SEP).collect();
    if parts.len() != 3 {
        return Err(CodecError::Malformed { section: "ball", entry: entry.to_string() });
    }
    Ok([
        base36::decode_tenths(parts[0])?,
        base36::decode_tenths(parts[1])?,
        base36::decode_tenths(parts[2])?,
    ])
}

fn decode_player(entry: &str) -> Result<PlayerPath, CodecError> {
    let (id, waypoints) = entry
        .trim()
        .split_once(ID_SEP)
        .ok_or_else(|| CodecError::Malformed { section: "players", entry: entry.to_string() })?;
    let waypoints = non_empty(waypoints, POINT_SEP).map(decode_waypoint).collect::<Result<_, _>>()?;
    Ok(PlayerPath { id: id.to_string(), waypoints })
}

fn decode_waypoint(entry: &str) -> Result<Waypoint, CodecError> {
    let parts: Vec<&str> = entry.split(FIELD_SEP).collect();
    let [x, z, deg, anim] = parts.as_slice() else {
        return Err(CodecError::Malformed { section: "waypoint", entry: entry.to_string() });
    };

    let mut anim_chars = anim.chars();
    let animation = match (anim_chars.next(), anim_chars.next()) {
        (Some(c), None) => Animation::from_code(c),
        _ => None,
    }
    .ok_or_else(|| CodecError::UnknownAnimationCode(anim.to_string()))?;

    Ok(Waypoint {
        x: base36::decode_tenths(x)?,
        z: base36::decode_tenths(z)?,
        rotation: from_degrees(base36::decode(deg)? as i32),
        animation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proptest_gen::waypoint_play_strategy;
    use proptest::prelude::*;

    fn sample() -> WaypointPlay {
        WaypointPlay {
            outcome: Outcome::Touchdown,
            yards_gained: 42,
            time_elapsed: 9.0,
            summary: "QB finds WR deep | 42 yard TD".into(),
            ball_path: vec![[0.0, 1.5, 0.0], [3.2, 9.0, 20.0], [6.0, 1.0, 42.0]],
            player_paths: vec![
                PlayerPath {
                    id: "off_1".into(),
                    waypoints: vec![
                        Waypoint { x: 0.0, z: -5.0, rotation: 0.0, animation: Animation::Throw },
                        Waypoint { x: 0.0, z: -6.0, rotation: std::f32::consts::PI, animation: Animation::Idle },
                    ],
                },
                PlayerPath {
                    id: "def_3".into(),
                    waypoints: vec![Waypoint { x: -2.5, z: 30.0, rotation: -1.0, animation: Animation::Backpedal }],
                },
            ],
            events: vec!["snap".into(), "catch".into()],
        }
    }

    #[test]
    fn test_wire_form_snapshot() {
        let encoded = encode_play(&sample()).unwrap();
        insta::assert_snapshot!(
            encoded,
            @"T9:16|0,f,0~w,2i,5k~1o,a,bo|off_1:0,-1e,0,t~0,-1o,50,i;def_3:-p,8c,-1l,b|snap,catch|QB finds WR deep | 42 yard TD"
        );
    }

    #[test]
    fn test_roundtrip_sample() {
        let original = sample();
        let decoded = decode_play(&encode_play(&original).unwrap()).unwrap();
        assert_eq!(decoded.outcome, original.outcome);
        assert_eq!(decoded.summary, original.summary);
        assert_eq!(decoded.events, original.events);
        assert_eq!(decoded.yards_gained, 42);
        assert_eq!(decoded.time_elapsed, 9.0);
        assert_eq!(decoded.player_paths[1].waypoints[0].animation, Animation::Backpedal);
    }

    #[test]
    fn test_reserved_characters_rejected() {
        let mut play = sample();
        play.player_paths[0].id = "off;1".into();
        assert!(matches!(encode_play(&play), Err(CodecError::ReservedCharacter { .. })));

        let mut play = sample();
        play.events = vec!["snap,fake".into()];
        assert!(matches!(encode_play(&play), Err(CodecError::ReservedCharacter { .. })));
    }

    #[test]
    fn test_padded_or_blank_tokens_rejected() {
        for events in [vec![" snap".to_string()], vec!["catch ".into()], vec![" ".into()]] {
            let mut play = sample();
            play.events = events;
            assert!(matches!(
                encode_play(&play),
                Err(CodecError::ReservedCharacter { field: "event", .. })
            ));
        }

        let mut play = sample();
        play.player_paths[0].id = " off_1".into();
        assert!(matches!(
            encode_play(&play),
            Err(CodecError::ReservedCharacter { field: "player id", .. })
        ));

        let mut play = sample();
        play.events = vec!["play action".into()];
        play.player_paths[1].id = "def 3".into();
        let decoded = decode_play(&encode_play(&play).unwrap()).unwrap();
        assert_eq!(decoded.events, vec!["play action".to_string()]);
        assert_eq!(decoded.player_paths[1].id, "def 3");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_play("T9:0|0,0,0"), Err(CodecError::SectionCount { found: 2 })));
        assert!(matches!(decode_play("|||| x"), Err(CodecError::EmptyHeader)));
        assert!(matches!(decode_play("Q9:0||||"), Err(CodecError::UnknownOutcomeCode('Q'))));
        assert!(matches!(
            decode_play("K5:3|0,0|||"),
            Err(CodecError::Malformed { section: "ball", .. })
        ));
        assert!(matches!(
            decode_play("K5:3||off_1:0,0,0,x|| "),
            Err(CodecError::UnknownAnimationCode(_))
        ));
    }

    #[test]
    fn test_decode_tolerates_missing_yards_and_empty_sections() {
        let play = decode_play("k9||||Stopped at the line").unwrap();
        assert_eq!(play.outcome, Outcome::Tackle);
        assert_eq!(play.yards_gained, 0);
        assert!(play.ball_path.is_empty());
        assert!(play.player_paths.is_empty());
        assert!(play.events.is_empty());
        assert_eq!(play.summary, "Stopped at the line");
    }

    proptest! {
        #[test]
        fn prop_encode_accepts_only_what_decodes_back(
            events in prop::collection::vec("[ a-z]{0,4}", 0..=3),
        ) {
            let mut play = sample();
            play.events = events.clone();
            match encode_play(&play) {
                Ok(wire) => prop_assert_eq!(decode_play(&wire).unwrap().events, events),
                Err(_) => prop_assert!(events.iter().any(|e| e.trim() != e || e.is_empty())),
            }
        }

        #[test]
        fn prop_roundtrip_within_quantization(play in waypoint_play_strategy()) {
            let decoded = decode_play(&encode_play(&play).unwrap()).unwrap();
            prop_assert_eq!(decoded.outcome, play.outcome);
            prop_assert_eq!(&decoded.summary, &play.summary);
            prop_assert_eq!(&decoded.events, &play.events);
            prop_assert_eq!(decoded.yards_gained, play.yards_gained);
            prop_assert_eq!(decoded.ball_path.len(), play.ball_path.len());
            for (a, b) in decoded.ball_path.iter().zip(&play.ball_path) {
                for axis in 0..3 {
                    prop_assert!((a[axis] - b[axis]).abs() <= 0.1 + 1e-4);
                }
            }
            prop_assert_eq!(decoded.player_paths.len(), play.player_paths.len());
            for (a, b) in decoded.player_paths.iter().zip(&play.player_paths) {
                prop_assert_eq!(&a.id, &b.id);
                prop_assert_eq!(a.waypoints.len(), b.waypoints.len());
                for (wa, wb) in a.waypoints.iter().zip(&b.waypoints) {
                    prop_assert!((wa.x - wb.x).abs() <= 0.1 + 1e-4);
                    prop_assert!((wa.z - wb.z).abs() <= 0.1 + 1e-4);
                    prop_assert!((wa.rotation - wb.rotation).abs().to_degrees() <= 1.0);
                    prop_assert_eq!(wa.animation, wb.animation);
                }
            }
        }
    }
}
