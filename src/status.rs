//! Status output transcoding and classification.
//!
//! The Windows service manager emits its status text encoded as UTF-16, while
//! every comparison in this crate happens on plain UTF-8 strings. Decoding is
//! kept as a pure function so it can be tested against fixed byte fixtures.

use crate::constants::RUNNING_STATES;

/// Decodes status-query output from UTF-16LE into a normalized string.
///
/// A leading byte-order mark is stripped, undecodable code units are replaced
/// lossily, a trailing odd byte is ignored, and trailing whitespace (including
/// CRLF) is trimmed.
pub fn decode_status_output(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let decoded = String::from_utf16_lossy(&units);
    decoded
        .strip_prefix('\u{feff}')
        .unwrap_or(&decoded)
        .trim_end()
        .to_string()
}

/// Whether a normalized state string counts as running for reporting
/// purposes. `SERVICE_STOP_PENDING` still counts: the stop has not completed.
pub fn is_running_state(state: &str) -> bool {
    RUNNING_STATES
        .iter()
        .any(|running| state.eq_ignore_ascii_case(running))
}
