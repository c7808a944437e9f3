//! Decision parsing for Moderator and Judge replies.
//!
//! Models are asked to answer with a single JSON object, but their replies
//! routinely wrap it in prose, fence it in markdown, or offer several
//! alternatives. These functions recover a [`DecisionObject`] from such
//! text. They are pure domain logic: no I/O, no model calls.
//!
//! # Strategy (first success wins)
//!
//! | Step | Input | Accepts |
//! |------|-------|---------|
//! | 1 | [`strip_code_fences`] | removes ```` ```json ```` / ```` ``` ```` markers |
//! | 2 | [`brace_candidates`] | each balanced `{...}` block, left to right |
//! | 3 | whole cleaned text | a bare JSON object |
//! | 4 | fallback | undecided decision naming the context |
//!
//! Model output is only ever handed to `serde_json`; it is never evaluated.

use super::decision::DecisionObject;
use serde_json::Value;
use tracing::warn;

const FENCE: &str = "```";

/// Recover a decision from a free-text reply.
///
/// Never fails: unparseable text yields an undecided decision whose
/// rationale names `context`, so the caller's round loop keeps advancing.
///
/// # Examples
///
/// ```
/// use debate_domain::debate::parsing::normalize_decision;
///
/// let reply = "Here is my verdict:\n```json\n{\"final_answer\": \"X\", \"supported_side\": \"Affirmative\"}\n```";
/// assert_eq!(normalize_decision(reply, "moderator round 1").final_answer, "X");
///
/// let fallback = normalize_decision("no json here", "judge final decision");
/// assert_eq!(fallback.final_answer, "");
/// assert!(fallback.rationale.contains("judge final decision"));
/// ```
pub fn normalize_decision(response: &str, context: &str) -> DecisionObject {
    if let Some(decision) = try_parse_decision(response) {
        return decision;
    }

    warn!(context = %context, "Could not parse decision from model reply");
    DecisionObject::undecided(format!("failed to parse response from {}", context))
}

/// Steps 1-3 of the strategy; `None` when nothing parses.
pub fn try_parse_decision(response: &str) -> Option<DecisionObject> {
    let cleaned = strip_code_fences(response);

    brace_candidates(&cleaned)
        .into_iter()
        .find_map(parse_object)
        .or_else(|| parse_object(&cleaned))
}

/// Remove markdown fence markers, keeping the fenced content.
///
/// Each ```` ``` ```` marker is dropped together with an optional `json`
/// language tag (any case) and the whitespace that follows it. The result
/// is trimmed.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        if rest.len() >= 4 && rest.is_char_boundary(4) && rest[..4].eq_ignore_ascii_case("json") {
            rest = &rest[4..];
        }
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Non-overlapping balanced `{...}` substrings, left to right.
///
/// Braces inside JSON string literals are ignored, so a rationale such as
/// `"use {x} here"` does not cut a candidate short. An opening brace that
/// is never closed yields no candidate and scanning resumes after it.
pub fn brace_candidates(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut candidates = Vec::new();
    let mut start = 0;

    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        match matching_close(bytes, open) {
            Some(close) => {
                candidates.push(&text[open..=close]);
                start = close + 1;
            }
            None => start = open + 1,
        }
    }

    candidates
}

/// Index of the brace closing the one at `open`, if any.
fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strict parse; only JSON objects count as decisions.
fn parse_object(candidate: &str) -> Option<DecisionObject> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(DecisionObject::from_json_object(&map)),
        _ => None,
    }
}
