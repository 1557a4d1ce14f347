use super::play_log::PlayLog;
use anyhow::Context;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write the play log as pretty JSON. Temp file plus rename, so a crash
/// mid-write never leaves a truncated log behind.
pub fn save_play_log_json<P: AsRef<Path>>(play_log: &PlayLog, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(play_log)?;
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)
            .with_context(|| format!("creating {}", temp_path.display()))?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path).with_context(|| format!("replacing {}", path.display()))?;

    log::debug!("Saved {} plays ({} bytes) to {:?}", play_log.len(), data.len(), path);
    Ok(())
}

pub fn load_play_log_json<P: AsRef<Path>>(path: P) -> anyhow::Result<PlayLog> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|| format!("reading play log {}", path.display()))?;
    let play_log: PlayLog = serde_json::from_str(&data)
        .with_context(|| format!("parsing play log {}", path.display()))?;
    log::debug!("Loaded {} plays from {:?}", play_log.len(), path);
    Ok(play_log)
}
