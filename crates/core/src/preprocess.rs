//! Line preprocessing: YAML frontmatter removal and fenced-block unwrapping.
//!
//! Both steps keep the original 1-based line numbers so diagnostics point
//! into the file the user actually wrote.

/// A source line with its 1-based number in the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedLine<'a> {
    pub number: u32,
    pub text: &'a str,
}

/// Number the lines of `text`, strip frontmatter, then unwrap a fenced
/// block if one is present.
pub fn preprocess(text: &str) -> Vec<NumberedLine<'_>> {
    let lines: Vec<NumberedLine<'_>> = text
        .lines()
        .enumerate()
        .map(|(idx, text)| NumberedLine {
            number: idx as u32 + 1,
            text,
        })
        .collect();
    let lines = strip_frontmatter(&lines);
    unwrap_fence(lines).to_vec()
}

/// Drop a leading `---` ... `---` block. The opening delimiter must be the
/// first non-empty line; without a closing delimiter nothing is removed.
pub fn strip_frontmatter<'l, 'a>(lines: &'l [NumberedLine<'a>]) -> &'l [NumberedLine<'a>] {
    let Some(open) = lines.iter().position(|l| !l.text.trim().is_empty()) else {
        return lines;
    };
    if lines[open].text.trim() != "---" {
        return lines;
    }
    match lines[open + 1..]
        .iter()
        .position(|l| l.text.trim() == "---")
    {
        Some(offset) => &lines[open + offset + 2..],
        None => lines,
    }
}

/// Keep only the lines strictly between the first two fence lines.
pub fn unwrap_fence<'l, 'a>(lines: &'l [NumberedLine<'a>]) -> &'l [NumberedLine<'a>] {
    let mut fences = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.text.trim().starts_with("```"))
        .map(|(idx, _)| idx);
    match (fences.next(), fences.next()) {
        (Some(start), Some(end)) => &lines[start + 1..end],
        _ => lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(lines: &[NumberedLine<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn plain_text_passes_through() {
        let out = preprocess("Title\n\nMeta: Tier: micro");
        assert_eq!(texts(&out), vec!["Title", "", "Meta: Tier: micro"]);
        assert_eq!(out[2].number, 3);
    }

    #[test]
    fn frontmatter_is_removed_and_numbers_kept() {
        let out = preprocess("---\nname: skill\ndescription: x\n---\nTitle\nPurpose");
        assert_eq!(texts(&out), vec!["Title", "Purpose"]);
        assert_eq!(out[0].number, 5);
    }

    #[test]
    fn frontmatter_after_blank_lines() {
        let out = preprocess("\n\n---\nname: x\n---\nBody");
        assert_eq!(texts(&out), vec!["Body"]);
        assert_eq!(out[0].number, 6);
    }

    #[test]
    fn unclosed_frontmatter_is_kept() {
        let out = preprocess("---\nname: x\nBody");
        assert_eq!(texts(&out), vec!["---", "name: x", "Body"]);
    }

    #[test]
    fn fenced_document_is_unwrapped() {
        let out = preprocess("Intro text\n```markdown\nTitle\nMeta: Tier: micro\n```\ntrailer");
        assert_eq!(texts(&out), vec!["Title", "Meta: Tier: micro"]);
        assert_eq!(out[0].number, 3);
    }

    #[test]
    fn single_fence_is_ignored() {
        let out = preprocess("Title\n```\nbody");
        assert_eq!(texts(&out), vec!["Title", "```", "body"]);
    }

    #[test]
    fn frontmatter_then_fence() {
        let out = preprocess("---\na: b\n---\n```\nInner\n```");
        assert_eq!(texts(&out), vec!["Inner"]);
        assert_eq!(out[0].number, 5);
    }
}
