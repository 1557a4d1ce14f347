pub mod json_api;

pub use json_api::*;

/// Stable prefixes for `Result<String, String>` errors at the JSON boundary
pub mod error_codes {
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const DECODE_FAILED: &str = "DECODE_FAILED";
    pub const ENCODE_FAILED: &str = "ENCODE_FAILED";
    pub const MATCH_FINISHED: &str = "MATCH_FINISHED";
    pub const SERIALIZE_FAILED: &str = "SERIALIZE_FAILED";
}
