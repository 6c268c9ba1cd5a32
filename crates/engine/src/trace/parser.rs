//! Text Trace Loader.
//!
//! Parses the line-oriented trace format:
//!
//! ```text
//! # comment
//! R 0x1A2B
//! W 40
//! 0x80            (bare address: implied read)
//! ```
//!
//! One access per line, whitespace-trimmed. Blank lines and lines starting
//! with `#` are comments. Addresses are hexadecimal, case-insensitive, with
//! or without a `0x` prefix. Malformed lines are silently skipped; the
//! skipped-line count is reported alongside the accesses for consumers that
//! want it.

use crate::common::data::Access;

/// The result of parsing one trace text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTrace {
    /// Accesses in file order.
    pub accesses: Vec<Access>,
    /// Number of malformed lines that were skipped.
    pub skipped: usize,
}

/// Parses a trace text into an access stream.
///
/// Parsing is total: malformed lines never abort the load, they only bump
/// the skipped count.
///
/// # Arguments
///
/// * `text` - The full trace file contents.
///
/// # Returns
///
/// The accesses of every well-formed line plus the skipped-line count.
pub fn parse_trace(text: &str) -> ParsedTrace {
    let mut parsed = ParsedTrace::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some(access) => parsed.accesses.push(access),
            None => parsed.skipped += 1,
        }
    }
    parsed
}

/// Parses one trimmed, non-comment line: `(R|W) <hex>` or `<hex>` alone.
fn parse_line(line: &str) -> Option<Access> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    let (is_write, digits) = match first {
        "R" | "r" => (false, fields.next()?),
        "W" | "w" => (true, fields.next()?),
        bare => (false, bare),
    };
    // Anything after the address makes the line malformed.
    if fields.next().is_some() {
        return None;
    }
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    let address = u32::from_str_radix(digits, 16).ok()?;
    Some(Access { address, is_write })
}
