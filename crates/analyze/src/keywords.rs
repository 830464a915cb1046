//! Requirement-keyword heuristic.
//!
//! Flags lowercase `must`, `should`, `may` (and the `not` forms) that read
//! like requirement keywords in spec prose, so authors can capitalise them.

use std::sync::OnceLock;

/// Verbs that typically follow a requirement keyword in spec prose.
const FOLLOWERS: &[&str] = &[
    "be", "not", "contain", "have", "include", "equal", "match", "exceed", "support", "handle",
    "return", "produce", "accept", "reject", "validate", "provide", "preserve", "apply", "display",
    "run", "send", "record", "persist", "satisfy",
];

/// Subjects after which the keyword is most likely ordinary English.
const PRECURSORS: &[&str] = &[
    "you", "we", "they", "i", "one", "it", "this", "that", "who", "which", "what", "if", "when",
    "where", "how", "why",
];

#[allow(clippy::expect_used)] // Static regex pattern is hardcoded and valid
fn keyword_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"(?i)\b(must not|must|should not|should|may)\b").expect("valid regex")
    })
}

fn normalise(word: &str) -> String {
    word.to_lowercase()
        .trim_end_matches(['.', ',', ';', ':'])
        .to_owned()
}

/// Does a keyword between `before` and `after` read as a requirement?
///
/// True iff the first word of `after` is a follower verb and the last word
/// of `before` is not a normal-English precursor.
pub fn is_requirement_keyword(before: &str, after: &str) -> bool {
    let first_after = after.split_whitespace().next().map(normalise);
    let last_before = before.split_whitespace().last().map(normalise);

    let Some(first_after) = first_after else {
        return false;
    };
    if !FOLLOWERS.contains(&first_after.as_str()) {
        return false;
    }
    !last_before.is_some_and(|w| PRECURSORS.contains(&w.as_str()))
}

/// Lowercase requirement keywords used as requirements in `text`, in
/// order of appearance.
///
/// Uppercase matches are already correct and mixed-case matches are
/// ignored.
pub fn lowercase_requirement_keywords(text: &str) -> Vec<&str> {
    keyword_re()
        .find_iter(text)
        .filter(|m| {
            let word = m.as_str();
            word == word.to_lowercase() && word != word.to_uppercase()
        })
        .filter(|m| is_requirement_keyword(&text[..m.start()], &text[m.end()..]))
        .map(|m| m.as_str())
        .collect()
}
