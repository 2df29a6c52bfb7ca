//! Extension hints recognized on schema nodes
//!
//! Hints are read once per node into [`ExtensionHints`]. Hints that make
//! schema constraints redundant produce a suppression set instead of
//! clearing the constraints on the node.

use reqschema_core::Extensions;
use serde_json::Value;
use std::collections::HashSet;

/// Schema constraints a hint can suppress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Minimum,
    Maximum,
    MinLength,
    MaxLength,
    MinItems,
    MaxItems,
    Pattern,
}

/// Typed view of a node's extension hints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionHints {
    /// `date_format`
    pub date_format: Option<String>,

    /// `mimes`; a list is joined with `,`
    pub mimes: Option<String>,

    /// `pattern`; used verbatim as the regex operand
    pub pattern: Option<String>,

    /// `validation`; externally defined rule identifiers
    pub validation: Vec<String>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(values) => Some(
            values
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

fn identifiers(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.iter().flat_map(identifiers).collect(),
        other => scalar_text(other)
            .filter(|id| !id.is_empty())
            .into_iter()
            .collect(),
    }
}

impl ExtensionHints {
    /// Read the recognized hints; other keys are ignored
    pub fn parse(extensions: &Extensions) -> Self {
        let mut hints = Self::default();

        for (name, value) in extensions {
            match name.as_str() {
                "date_format" => hints.date_format = scalar_text(value),
                "mimes" => hints.mimes = scalar_text(value),
                "pattern" => hints.pattern = scalar_text(value),
                "validation" => hints.validation = identifiers(value),
                other => tracing::debug!(hint = %other, "ignoring unrecognized extension hint"),
            }
        }

        hints
    }

    /// Constraints made redundant by these hints
    pub fn suppressed(&self) -> HashSet<ConstraintKind> {
        let mut suppressed = HashSet::new();

        if self.date_format.is_some() {
            suppressed.extend([
                ConstraintKind::Maximum,
                ConstraintKind::MaxLength,
                ConstraintKind::Minimum,
                ConstraintKind::MinLength,
                ConstraintKind::Pattern,
            ]);
        }

        if self.pattern.is_some() {
            suppressed.insert(ConstraintKind::Pattern);
        }

        suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extensions(value: Value) -> Extensions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parse_known_hints() {
        let hints = ExtensionHints::parse(&extensions(json!({
            "date_format": "Ymd",
            "mimes": ["jpg", "png"],
            "validation": ["uppercase", "", "trimmed"],
            "example": "ignored"
        })));

        assert_eq!(hints.date_format.as_deref(), Some("Ymd"));
        assert_eq!(hints.mimes.as_deref(), Some("jpg,png"));
        assert_eq!(hints.pattern, None);
        assert_eq!(hints.validation, vec!["uppercase", "trimmed"]);
    }

    #[test]
    fn empty_validation_is_ignored() {
        let hints = ExtensionHints::parse(&extensions(json!({ "validation": "" })));
        assert!(hints.validation.is_empty());
    }

    #[test]
    fn date_format_suppresses_bounds_and_pattern() {
        let hints = ExtensionHints::parse(&extensions(json!({ "date_format": "Hi" })));
        let suppressed = hints.suppressed();

        assert!(suppressed.contains(&ConstraintKind::MaxLength));
        assert!(suppressed.contains(&ConstraintKind::Pattern));
        assert!(!suppressed.contains(&ConstraintKind::MaxItems));
    }

    #[test]
    fn pattern_hint_suppresses_only_pattern() {
        let hints = ExtensionHints::parse(&extensions(json!({ "pattern": "/^[A-Z]+$/u" })));
        let suppressed = hints.suppressed();

        assert_eq!(suppressed.len(), 1);
        assert!(suppressed.contains(&ConstraintKind::Pattern));
    }
}
