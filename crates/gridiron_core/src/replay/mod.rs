pub mod controller;
pub mod io;
pub mod play_log;

pub use controller::PlaybackController;
pub use io::{load_play_log_json, save_play_log_json};
pub use play_log::{PlayLog, PlayLogEntry};
