//! Validation rule model
//!
//! Rules are directives for a request validator that runs later; this crate
//! never executes them against a payload except through [`ValidationRule`]
//! objects, which carry their own check.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// A rule object handed to the validator as-is
pub trait ValidationRule: fmt::Debug + Send + Sync {
    /// Stable identifier of the rule type
    fn name(&self) -> &str;

    /// Check a single value
    fn passes(&self, value: &Value) -> bool;
}

/// Type guard that only accepts real integers
///
/// `integer` alone lets numeric strings through; this guard does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerGuard;

impl IntegerGuard {
    pub const NAME: &'static str = "integer_guard";
}

impl ValidationRule for IntegerGuard {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn passes(&self, value: &Value) -> bool {
        value.is_i64() || value.is_u64()
    }
}

/// Base type rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRule {
    String,
    Numeric,
    Integer,
    Boolean,
    Array,
    File,
}

impl TypeRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::File => "file",
        }
    }
}

/// One validation directive
#[derive(Debug, Clone)]
pub enum Rule {
    Nullable,
    Present,
    Required,
    /// Required only when the given parent path is present
    RequiredWith(String),
    Type(TypeRule),
    DateFormat(String),
    Mimes(String),
    /// Full regex operand, delimiters included
    Regex(String),
    Max(Number),
    Min(Number),
    /// Value must be a case of the referenced enumerable type
    Enum(String),
    In(Vec<Value>),
    Object(Arc<dyn ValidationRule>),
    /// Externally defined rule passed through by name
    Named(String),
}

impl Rule {
    /// Rule object wrapper
    pub fn object(rule: impl ValidationRule + 'static) -> Self {
        Self::Object(Arc::new(rule))
    }

    /// Pass-through rule token
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        use Rule::*;
        match (self, other) {
            (Nullable, Nullable) | (Present, Present) | (Required, Required) => true,
            (RequiredWith(a), RequiredWith(b)) => a == b,
            (Type(a), Type(b)) => a == b,
            (DateFormat(a), DateFormat(b)) => a == b,
            (Mimes(a), Mimes(b)) => a == b,
            (Regex(a), Regex(b)) => a == b,
            (Max(a), Max(b)) | (Min(a), Min(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            (In(a), In(b)) => a == b,
            (Object(a), Object(b)) => a.name() == b.name(),
            (Named(a), Named(b)) => a == b,
            _ => false,
        }
    }
}

/// Render one `in:` operand, quoted with embedded quotes doubled
fn quote_value(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("\"{}\"", raw.replace('"', "\"\""))
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable => write!(f, "nullable"),
            Self::Present => write!(f, "present"),
            Self::Required => write!(f, "required"),
            Self::RequiredWith(path) => write!(f, "required_with:{}", path),
            Self::Type(ty) => write!(f, "{}", ty.as_str()),
            Self::DateFormat(format) => write!(f, "date_format:{}", format),
            Self::Mimes(mimes) => write!(f, "mimes:{}", mimes),
            Self::Regex(regex) => write!(f, "regex:{}", regex),
            Self::Max(n) => write!(f, "max:{}", n),
            Self::Min(n) => write!(f, "min:{}", n),
            Self::Enum(type_ref) => write!(f, "enum:{}", type_ref),
            Self::In(values) => {
                let values: Vec<String> = values.iter().map(quote_value).collect();
                write!(f, "in:{}", values.join(","))
            }
            Self::Object(rule) => write!(f, "{}", rule.name()),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
