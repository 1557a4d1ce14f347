//! Signed base-36 integers, lowercase digits, `-` prefix for negatives.

use crate::error::CodecError;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn encode(value: i64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    let mut rest = value.unsigned_abs();
    while rest > 0 {
        digits.push(DIGITS[(rest % 36) as usize]);
        rest /= 36;
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    // Only ASCII digits and '-' were pushed.
    String::from_utf8(digits).unwrap_or_default()
}

pub fn decode(text: &str) -> Result<i64, CodecError> {
    if text.is_empty() || text.starts_with('+') {
        return Err(CodecError::InvalidNumber(text.to_string()));
    }
    i64::from_str_radix(&text.to_ascii_lowercase(), 36)
        .map_err(|_| CodecError::InvalidNumber(text.to_string()))
}

/// Fixed-point tenths, the compact form's coordinate precision
pub fn encode_tenths(value: f32) -> String {
    encode((value * 10.0).round() as i64)
}

pub fn decode_tenths(text: &str) -> Result<f32, CodecError> {
    Ok(decode(text)? as f32 / 10.0)
}
