//! Schema node model
//!
//! A [`SchemaNode`] is one fragment of a recursively nested payload shape.
//! Trees are built once per compilation request and stay read-only while
//! the compilers walk them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Custom hint name to value (`x-` extensions on the schema)
pub type Extensions = IndexMap<String, Value>;

/// Declared type of a schema node
///
/// A node without a kind is untyped and gets no type rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaKind {
    /// Type name as written in the schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Arrays and objects are checked with `present` instead of `required`
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowed values of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enumeration {
    /// Reference to an enumerable type (e.g. `App\Enums\Status`)
    TypeRef(String),

    /// Explicit value list
    Values(Vec<Value>),
}

/// Numeric, length, count, enumeration and pattern bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Enumeration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Constraints {
    /// Fill every unset bound from `other`; values already set are kept
    pub fn fill_missing(&mut self, other: &Constraints) {
        fn fill<T: Clone>(slot: &mut Option<T>, other: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(other);
            }
        }

        fill(&mut self.minimum, &other.minimum);
        fill(&mut self.maximum, &other.maximum);
        fill(&mut self.min_length, &other.min_length);
        fill(&mut self.max_length, &other.max_length);
        fill(&mut self.min_items, &other.min_items);
        fill(&mut self.max_items, &other.max_items);
        fill(&mut self.enumeration, &other.enumeration);
        fill(&mut self.pattern, &other.pattern);
    }
}

/// Parameter binding: the external-facing name and requiredness of a field
///
/// Merged into the field's structural schema before compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// External name, possibly with a `[]` suffix for array parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the parameter lives (path, query, header, ...)
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, rename = "x", skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: Extensions,

    #[serde(flatten)]
    pub constraints: Constraints,
}

impl Binding {
    /// Create a binding with an external name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Mark the binding as required
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an extension hint
    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    /// Set the constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Name usable as a path key for a schema of the given kind
    ///
    /// `[]` marks "array of" in parameter names and is not a valid key.
    pub fn key_name(&self, kind: Option<SchemaKind>) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(match kind {
            Some(SchemaKind::Array) => name.replace("[]", ""),
            _ => name.to_string(),
        })
    }
}

/// One schema fragment: scalar, object or array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaKind>,

    /// Raw field identifier
    #[serde(default, rename = "property", skip_serializing_if = "Option::is_none")]
    pub property_key: Option<String>,

    /// Overrides `property_key` for naming and paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `None` means unspecified, which counts as not nullable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Names of the immediate children that must be present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Object properties, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<SchemaNode>,

    /// Item schema of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(flatten)]
    pub constraints: Constraints,

    #[serde(default, rename = "x", skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: Extensions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<Box<Binding>>,
}

impl SchemaNode {
    /// Create an untyped node
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node for a named property
    pub fn property(key: impl Into<String>) -> Self {
        Self {
            property_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Create a typed node for a named property
    pub fn typed(key: impl Into<String>, kind: SchemaKind) -> Self {
        Self::property(key).with_kind(kind)
    }

    /// Set the kind
    pub fn with_kind(mut self, kind: SchemaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set nullability explicitly
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Declare the required children
    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(required.into_iter().map(Into::into).collect());
        self
    }

    /// Set the object properties
    pub fn with_properties(mut self, properties: Vec<SchemaNode>) -> Self {
        self.properties = properties;
        self
    }

    /// Set the array item schema
    pub fn with_items(mut self, items: SchemaNode) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Set the constraints
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Add an extension hint
    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    /// Attach a parameter binding
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(Box::new(binding));
        self
    }

    /// Name used for this node's path segment
    ///
    /// Title, then property key, then the binding's name.
    pub fn display_name(&self) -> Option<String> {
        if let Some(title) = &self.title {
            return Some(title.clone());
        }
        if let Some(key) = &self.property_key {
            return Some(key.clone());
        }
        self.binding.as_ref().and_then(|b| b.key_name(self.kind))
    }

    /// Human text for labels: description, then title, then property key
    pub fn label(&self) -> String {
        self.description
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| self.property_key.clone())
            .or_else(|| self.binding.as_ref().and_then(|b| b.name.clone()))
            .unwrap_or_default()
    }

    /// Only an explicit `nullable: true` makes a node nullable
    pub fn is_nullable(&self) -> bool {
        self.nullable == Some(true)
    }

    /// Properties of an item schema that has its own children
    ///
    /// Returns `None` for scalar (and array) items, which are compiled as a
    /// single `.*` entry instead.
    pub fn item_properties(&self) -> Option<&[SchemaNode]> {
        if self.kind == Some(SchemaKind::Object) || !self.properties.is_empty() {
            Some(&self.properties)
        } else {
            None
        }
    }
}
