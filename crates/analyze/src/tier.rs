//! Spec tiers and their required section sets.

use sesf_core::{Document, SectionKind};
use serde::Serialize;

/// Spec tier, from the `Tier` meta field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Micro,
    Standard,
    Complex,
}

const MICRO: &[SectionKind] = &[
    SectionKind::Meta,
    SectionKind::Purpose,
    SectionKind::Behaviors,
];

const STANDARD: &[SectionKind] = &[
    SectionKind::Meta,
    SectionKind::Purpose,
    SectionKind::Scope,
    SectionKind::Inputs,
    SectionKind::Outputs,
    SectionKind::Types,
    SectionKind::Functions,
    SectionKind::Behaviors,
    SectionKind::Constraints,
    SectionKind::Dependencies,
];

impl Tier {
    pub fn parse(name: &str) -> Option<Tier> {
        match name {
            "micro" => Some(Tier::Micro),
            "standard" => Some(Tier::Standard),
            "complex" => Some(Tier::Complex),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Micro => "micro",
            Tier::Standard => "standard",
            Tier::Complex => "complex",
        }
    }

    /// Sections the tier requires, sorted by section name.
    pub fn required_sections(self) -> Vec<SectionKind> {
        let mut sections = match self {
            Tier::Micro => MICRO.to_vec(),
            Tier::Standard => STANDARD.to_vec(),
            Tier::Complex => {
                let mut v = STANDARD.to_vec();
                v.push(SectionKind::Precedence);
                v
            }
        };
        sections.sort_by_key(|s| s.as_str());
        sections
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the Meta section says about the tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierDecl {
    Declared(Tier),
    Missing,
    /// Lower-cased, trimmed value that names no tier.
    Unknown(String),
}

impl TierDecl {
    pub fn from_document(doc: &Document) -> TierDecl {
        let raw = doc
            .meta_value("tier")
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default();
        if raw.is_empty() {
            return TierDecl::Missing;
        }
        match Tier::parse(&raw) {
            Some(tier) => TierDecl::Declared(tier),
            None => TierDecl::Unknown(raw),
        }
    }

    pub fn declared(&self) -> Option<Tier> {
        match self {
            TierDecl::Declared(tier) => Some(*tier),
            _ => None,
        }
    }

    /// The tier used for section requirements: missing and unknown tiers
    /// fall back to micro.
    pub fn effective(&self) -> Tier {
        self.declared().unwrap_or(Tier::Micro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_tier(tier: Option<&str>) -> Document {
        let mut doc = Document::default();
        if let Some(t) = tier {
            doc.meta.insert("tier".into(), t.into());
        }
        doc
    }

    #[test]
    fn tier_from_meta_is_trimmed_and_lowercased() {
        let doc = doc_with_tier(Some("  Standard "));
        assert_eq!(
            TierDecl::from_document(&doc),
            TierDecl::Declared(Tier::Standard)
        );
    }

    #[test]
    fn missing_and_unknown_fall_back_to_micro() {
        let missing = TierDecl::from_document(&doc_with_tier(None));
        assert_eq!(missing, TierDecl::Missing);
        assert_eq!(missing.effective(), Tier::Micro);

        let unknown = TierDecl::from_document(&doc_with_tier(Some("Huge")));
        assert_eq!(unknown, TierDecl::Unknown("huge".into()));
        assert_eq!(unknown.effective(), Tier::Micro);
        assert_eq!(unknown.declared(), None);
    }

    #[test]
    fn required_sections_are_sorted_by_name() {
        let names: Vec<_> = Tier::Micro
            .required_sections()
            .into_iter()
            .map(SectionKind::as_str)
            .collect();
        assert_eq!(names, vec!["behaviors", "meta", "purpose"]);

        let complex = Tier::Complex.required_sections();
        assert_eq!(complex.len(), 11);
        assert!(complex.contains(&SectionKind::Precedence));
        assert!(!Tier::Standard
            .required_sections()
            .contains(&SectionKind::Precedence));
    }
}
