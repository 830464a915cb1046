//! Meta-line parsing: `Key: Value | Key: Value` and `* Key: Value`.

use crate::grammar::strip_prefix_ci;

/// Parse a pipe-delimited meta line into `(key, value)` pairs.
///
/// A leading `*`, `Meta:` or `Meta` token is ignored. Segments without a
/// colon are split on their first whitespace run (`Version 1.0.0`); a
/// segment that is a single bare token yields nothing. Keys are
/// lower-cased.
pub fn parse_pipe_line(line: &str) -> Vec<(String, String)> {
    let mut text = line.trim();
    if let Some(rest) = text.strip_prefix('*') {
        text = rest.trim();
    }
    if let Some(rest) = strip_prefix_ci(text, "meta:") {
        text = rest.trim();
    }
    if let Some(rest) = strip_prefix_ci(text, "meta") {
        text = rest.trim();
    }

    text.split('|')
        .map(str::trim)
        .filter_map(parse_segment)
        .collect()
}

/// Parse a bulleted single-field meta line (`* Key: Value`).
pub fn parse_bullet_line(line: &str) -> Option<(String, String)> {
    let text = line.trim().strip_prefix('*')?.trim();
    let (key, value) = text.split_once(':')?;
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim().to_owned()))
}

fn parse_segment(seg: &str) -> Option<(String, String)> {
    let (key, value) = match seg.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => {
            let (first, rest) = seg.split_once(char::is_whitespace)?;
            let rest = rest.trim();
            if rest.is_empty() {
                return None;
            }
            (first.trim(), rest)
        }
    };
    if key.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), value.to_owned()))
}
