//! Report: ordered, categorised diagnostics from every check that ran.
//!
//! The report performs no validation of its own. It keeps diagnostics in
//! the order checks produced them, counts them by status, and groups
//! consecutive diagnostics of the same category for display.

use serde::Serialize;

use crate::tier::Tier;

/// Outcome of a single check item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }

    /// Single-character marker used in text output.
    pub fn symbol(self) -> char {
        match self {
            Status::Pass => '\u{2713}',
            Status::Warn => '\u{26a0}',
            Status::Fail => '\u{2717}',
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic category. Text output prints a header each time the
/// category changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Meta,
    Sections,
    Behaviors,
    Keywords,
    TypeConsistency,
    RuleIntegrity,
    ErrorConsistency,
    ExampleConsistency,
    CrossBehavior,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Meta => "meta",
            Category::Sections => "sections",
            Category::Behaviors => "behaviors",
            Category::Keywords => "keywords",
            Category::TypeConsistency => "type_consistency",
            Category::RuleIntegrity => "rule_integrity",
            Category::ErrorConsistency => "error_consistency",
            Category::ExampleConsistency => "example_consistency",
            Category::CrossBehavior => "cross_behavior",
        }
    }

    /// Title-cased header label: `type_consistency` -> `Type Consistency`.
    pub fn label(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: Category,
    pub status: Status,
    pub message: String,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn pass(category: Category, message: impl Into<String>) -> Self {
        Self::new(category, Status::Pass, message)
    }

    pub fn warn(category: Category, message: impl Into<String>) -> Self {
        Self::new(category, Status::Warn, message)
    }

    pub fn fail(category: Category, message: impl Into<String>) -> Self {
        Self::new(category, Status::Fail, message)
    }

    fn new(category: Category, status: Status, message: impl Into<String>) -> Self {
        Diagnostic {
            category,
            status,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a source line. Zero means "no line" and is dropped.
    pub fn at(mut self, line: u32) -> Self {
        self.line = (line > 0).then_some(line);
        self
    }
}

/// Per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub warnings: usize,
    pub failures: usize,
}

/// Aggregated result of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    /// Tier used for section requirements (missing or unknown tiers are
    /// reported as micro).
    pub tier: Tier,
    pub checks_run: Vec<String>,
    pub results: Vec<Diagnostic>,
    pub summary: Summary,
}

impl Report {
    pub fn new(title: impl Into<String>, tier: Tier) -> Self {
        Report {
            title: title.into(),
            tier,
            checks_run: Vec::new(),
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Append the diagnostics of one check and record that it ran.
    pub fn record(&mut self, check: &str, diagnostics: Vec<Diagnostic>) {
        self.checks_run.push(check.to_string());
        for d in &diagnostics {
            match d.status {
                Status::Pass => self.summary.passed += 1,
                Status::Warn => self.summary.warnings += 1,
                Status::Fail => self.summary.failures += 1,
            }
        }
        self.results.extend(diagnostics);
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failures > 0
    }

    /// Process exit status: 1 if any check failed, else 0.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    /// Diagnostics with the given status, in report order.
    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &Diagnostic> {
        self.results.iter().filter(move |d| d.status == status)
    }

    /// Machine-readable form: the report fields plus the validated `file`.
    pub fn to_json(&self, file: &str) -> serde_json::Value {
        let mut value = serde_json::json!({ "file": file });
        if let (Some(out), Ok(serde_json::Value::Object(fields))) =
            (value.as_object_mut(), serde_json::to_value(self))
        {
            out.extend(fields);
        }
        value
    }

    /// Runs of consecutive diagnostics sharing a category.
    pub fn groups(&self) -> Vec<(Category, &[Diagnostic])> {
        self.results
            .chunk_by(|a, b| a.category == b.category)
            .filter_map(|chunk| chunk.first().map(|d| (d.category, chunk)))
            .collect()
    }
}
