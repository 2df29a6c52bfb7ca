//! Dotted field paths
//!
//! A path is an ordered list of segments joined by `.`; the `*` segment
//! stands for "any array index".

use reqschema_core::{CompileError, SchemaNode};

/// Segment denoting any index of an array
pub const WILDCARD: &str = "*";

/// Ancestor segments of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path of top-level fields
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// This path extended by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// This path extended by the wildcard segment
    pub fn wildcard(&self) -> Self {
        self.child(WILDCARD)
    }

    /// Dotted key, e.g. `items.*.code`
    pub fn key(&self) -> String {
        self.segments.join(".")
    }

    pub fn contains_wildcard(&self) -> bool {
        self.segments.iter().any(|s| s == WILDCARD)
    }

    /// Dotted key of the segments before the first wildcard
    pub fn before_wildcard(&self) -> String {
        self.segments
            .iter()
            .take_while(|s| *s != WILDCARD)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Name and paths of one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Display name, the last path segment
    pub name: String,

    /// Full path of the node
    pub path: FieldPath,
}

impl ResolvedPath {
    pub fn key(&self) -> String {
        self.path.key()
    }
}

/// Derives names and paths from a node and its ancestry
pub struct PathBuilder;

impl PathBuilder {
    /// Resolve the display name and paths of `node` under `ancestors`
    pub fn resolve(ancestors: &FieldPath, node: &SchemaNode) -> Result<ResolvedPath, CompileError> {
        let name = node.display_name().ok_or_else(|| CompileError::UnresolvableName {
            path: if ancestors.is_root() {
                "<root>".to_string()
            } else {
                ancestors.key()
            },
        })?;

        let path = ancestors.child(name.clone());
        Ok(ResolvedPath { name, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqschema_core::SchemaKind;

    #[test]
    fn keys_join_segments() {
        let path = FieldPath::root().child("items").wildcard().child("code");
        assert_eq!(path.key(), "items.*.code");
        assert!(path.contains_wildcard());
        assert_eq!(path.before_wildcard(), "items");
        assert_eq!(FieldPath::root().key(), "");
    }

    #[test]
    fn resolve_scalar() {
        let ancestors = FieldPath::from_segments(["parent"]);
        let node = SchemaNode::typed("key", SchemaKind::String).with_title("renamed");

        let resolved = PathBuilder::resolve(&ancestors, &node).unwrap();
        assert_eq!(resolved.name, "renamed");
        assert_eq!(resolved.key(), "parent.renamed");
    }

    #[test]
    fn array_items_extend_with_wildcard() {
        let node = SchemaNode::typed("tags", SchemaKind::Array);
        let resolved = PathBuilder::resolve(&FieldPath::root(), &node).unwrap();
        assert_eq!(resolved.path.wildcard().key(), "tags.*");
    }

    #[test]
    fn unnamed_node_fails() {
        let ancestors = FieldPath::from_segments(["a", "*"]);
        let err = PathBuilder::resolve(&ancestors, &SchemaNode::new()).unwrap_err();
        assert!(matches!(err, CompileError::UnresolvableName { path } if path == "a.*"));
    }
}
