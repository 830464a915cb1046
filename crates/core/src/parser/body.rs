//! Body-line handlers for RULE, ERROR, EXAMPLE and STEP sub-blocks.
//!
//! Clause keywords are matched case-insensitively against the trimmed
//! line. A later clause of the same kind overwrites an earlier one.

use crate::ast::{ErrorDecl, Example, Rule, Step};
use crate::grammar::strip_prefix_ci;

pub(super) fn rule_line(rule: &mut Rule, trimmed: &str) {
    rule.raw_text.push_str(trimmed);
    rule.raw_text.push('\n');

    if let Some(rest) = strip_prefix_ci(trimmed, "WHEN ") {
        rule.when = Some(rest.trim().to_owned());
    } else if let Some(rest) = strip_prefix_ci(trimmed, "THEN ") {
        rule.then = Some(rest.trim().to_owned());
    } else if let Some(rest) = strip_prefix_ci(trimmed, "ELSE ") {
        rule.else_ = Some(rest.trim().to_owned());
    } else if strip_prefix_ci(trimmed, "PRIORITY ").is_some() {
        if let Some(p) = last_int(trimmed) {
            rule.priority = Some(p);
        }
    }
}

pub(super) fn error_line(error: &mut ErrorDecl, trimmed: &str) {
    if let Some(rest) = strip_prefix_ci(trimmed, "WHEN ") {
        error.when = Some(rest.trim().to_owned());
    } else if let Some(rest) = strip_prefix_ci(trimmed, "SEVERITY ") {
        error.severity = Some(rest.trim().to_owned());
    } else if let Some(rest) = strip_prefix_ci(trimmed, "ACTION ") {
        error.action = Some(rest.trim().to_owned());
    } else if let Some(rest) = strip_prefix_ci(trimmed, "MESSAGE ") {
        error.message = Some(rest.trim().trim_matches('"').to_owned());
    }
}

pub(super) fn example_line(example: &mut Example, trimmed: &str) {
    if let Some(rest) = strip_prefix_ci(trimmed, "INPUT:") {
        example.input = rest.trim().to_owned();
    } else if let Some(rest) = strip_prefix_ci(trimmed, "EXPECTED:") {
        example.expected = rest.trim().to_owned();
    } else if let Some(rest) = strip_prefix_ci(trimmed, "NOTES:") {
        example.notes = Some(rest.trim().to_owned());
    }
}

pub(super) fn step_line(step: &mut Step, trimmed: &str) {
    if !step.body.is_empty() {
        step.body.push('\n');
    }
    step.body.push_str(trimmed);
}

/// `PRIORITY <n>` anywhere on a RULE opener line, including inside
/// brackets such as `(PRIORITY 1)`.
pub(super) fn inline_priority(line: &str) -> Option<i64> {
    line.match_indices("PRIORITY").find_map(|(at, kw)| {
        let rest = &line[at + kw.len()..];
        let number = rest.trim_start();
        if number.len() == rest.len() {
            return None;
        }
        let end = number
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(number.len());
        number[..end].parse().ok()
    })
}

fn last_int(line: &str) -> Option<i64> {
    line.split_whitespace().last()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_clauses_and_raw_text() {
        let mut rule = Rule::default();
        rule_line(&mut rule, "WHEN amount > 0");
        rule_line(&mut rule, "then approve");
        rule_line(&mut rule, "ELSE reject");
        rule_line(&mut rule, "AND log it");
        assert_eq!(rule.when.as_deref(), Some("amount > 0"));
        assert_eq!(rule.then.as_deref(), Some("approve"));
        assert_eq!(rule.else_.as_deref(), Some("reject"));
        assert_eq!(
            rule.raw_text,
            "WHEN amount > 0\nthen approve\nELSE reject\nAND log it\n"
        );
    }

    #[test]
    fn rule_priority_ignores_non_integers() {
        let mut rule = Rule::default();
        rule_line(&mut rule, "PRIORITY high");
        assert_eq!(rule.priority, None);
        rule_line(&mut rule, "PRIORITY 2");
        assert_eq!(rule.priority, Some(2));
    }

    #[test]
    fn error_fields_and_message_quotes() {
        let mut err = ErrorDecl::default();
        error_line(&mut err, "WHEN input is empty");
        error_line(&mut err, "SEVERITY critical");
        error_line(&mut err, "ACTION reject input");
        error_line(&mut err, "MESSAGE \"Input required\"");
        assert_eq!(err.when.as_deref(), Some("input is empty"));
        assert_eq!(err.severity.as_deref(), Some("critical"));
        assert_eq!(err.action.as_deref(), Some("reject input"));
        assert_eq!(err.message.as_deref(), Some("Input required"));
    }

    #[test]
    fn example_fields() {
        let mut ex = Example::default();
        example_line(&mut ex, "INPUT: \"a@b.ca\"");
        example_line(&mut ex, "EXPECTED: { \"valid\": true }");
        example_line(&mut ex, "continuation line");
        example_line(&mut ex, "Notes: plain");
        assert_eq!(ex.input, "\"a@b.ca\"");
        assert_eq!(ex.expected, "{ \"valid\": true }");
        assert_eq!(ex.notes.as_deref(), Some("plain"));
    }

    #[test]
    fn step_body_joins_lines() {
        let mut step = Step::default();
        step_line(&mut step, "COLLECT rows");
        step_line(&mut step, "FILTER rows");
        assert_eq!(step.body, "COLLECT rows\nFILTER rows");
    }

    #[test]
    fn inline_priority_on_opener() {
        assert_eq!(inline_priority("RULE fraud: PRIORITY 1"), Some(1));
        assert_eq!(inline_priority("RULE fraud: PRIORITY 3)"), Some(3));
        assert_eq!(inline_priority("RULE fraud: (PRIORITY 1)"), Some(1));
        assert_eq!(inline_priority("RULE fraud: [PRIORITY 2]"), Some(2));
        assert_eq!(inline_priority("RULE fraud: PRIORITY\t12"), Some(12));
        assert_eq!(inline_priority("RULE fraud: PRIORITY1"), None);
        assert_eq!(inline_priority("RULE fraud: PRIORITY high"), None);
        assert_eq!(inline_priority("RULE fraud:"), None);
    }
}
