//! Request definitions
//!
//! A request definition is the unit the compilers work on: a named payload
//! with ordered fields, each carrying its static type declaration plus the
//! schema (and optional parameter binding) describing it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::schema::{Binding, SchemaNode};

/// Static type declaration of a field, e.g. `int` or `?string`
///
/// Written in the `?type` shorthand where a leading `?` marks nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeclaredType {
    /// Base type name (`int`, `string`, `bool`, `float`, `array`, class name)
    pub type_name: String,

    /// Whether the declaration accepts null
    pub nullable: bool,
}

impl DeclaredType {
    /// Non-nullable declaration
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: false,
        }
    }

    /// Nullable declaration
    pub fn nullable(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: true,
        }
    }

    /// Whether this is an array declaration
    pub fn is_array(&self) -> bool {
        self.type_name == "array"
    }
}

/// Invalid `?type` declaration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclaredTypeError {
    #[error("empty type declaration: '{0}'")]
    Empty(String),
}

impl FromStr for DeclaredType {
    type Err = DeclaredTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (nullable, name) = match s.strip_prefix('?') {
            Some(rest) => (true, rest.trim()),
            None => (false, s),
        };

        if name.is_empty() {
            return Err(DeclaredTypeError::Empty(s.to_string()));
        }

        Ok(Self {
            type_name: name.to_string(),
            nullable,
        })
    }
}

impl TryFrom<String> for DeclaredType {
    type Error = DeclaredTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeclaredType> for String {
    fn from(value: DeclaredType) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "?{}", self.type_name)
        } else {
            write!(f, "{}", self.type_name)
        }
    }
}

/// One field of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Static field name
    pub name: String,

    /// Static type declaration
    #[serde(rename = "type")]
    pub declared: DeclaredType,

    /// Structural schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,

    /// Parameter binding merged into the schema before compiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
}

impl FieldDefinition {
    /// Create a field described by a schema
    pub fn new(name: impl Into<String>, declared: DeclaredType, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            declared,
            schema: Some(schema),
            binding: None,
        }
    }

    /// Attach a parameter binding
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }
}

/// A composed schema fragment contributing required names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFragment {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Fragments this one composes in turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<SchemaFragment>,
}

/// A request payload definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDefinition {
    pub name: String,

    /// Composed fragments whose required names apply to this request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<SchemaFragment>,

    /// The request's own required field names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A definitions file holds one request or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Many(Vec<RequestDefinition>),
    One(Box<RequestDefinition>),
}

impl RequestDefinition {
    /// Create an empty request definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the request's own required names
    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(required.into_iter().map(Into::into).collect());
        self
    }

    /// Add a composed fragment
    pub fn with_include(mut self, fragment: SchemaFragment) -> Self {
        self.includes.push(fragment);
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a definitions file holding one request or an array of them
    pub fn from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        Ok(match serde_json::from_str(json)? {
            DefinitionFile::Many(many) => many,
            DefinitionFile::One(one) => vec![*one],
        })
    }
}
