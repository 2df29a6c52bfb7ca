//! Required-name sets
//!
//! A required set always applies to the immediate children of the node
//! that declares it, never to grandchildren.

use indexmap::IndexSet;
use reqschema_core::{RequestDefinition, SchemaFragment};

/// Ordered set of child names that must be present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet {
    names: IndexSet<String>,
}

impl RequiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set for a declared `required` list; absent means empty
    pub fn resolve(declared: Option<&[String]>) -> Self {
        declared.into_iter().flatten().cloned().collect()
    }

    /// Union of a fragment's own list and everything it includes
    ///
    /// Included fragments come first, depth first.
    pub fn for_fragment(fragment: &SchemaFragment) -> Self {
        let mut set = Self::new();
        for included in &fragment.includes {
            set.union(&Self::for_fragment(included));
        }
        set.union(&Self::resolve(fragment.required.as_deref()));
        set
    }

    /// Top-level set of a request: every composed fragment plus its own list
    pub fn for_request(request: &RequestDefinition) -> Self {
        let mut set = Self::new();
        for fragment in &request.includes {
            set.union(&Self::for_fragment(fragment));
        }
        set.union(&Self::resolve(request.required.as_deref()));
        set
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Add every name of `other`
    pub fn union(&mut self, other: &RequiredSet) {
        self.names.extend(other.names.iter().cloned());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for RequiredSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_declaration_is_empty() {
        assert!(RequiredSet::resolve(None).is_empty());
    }

    #[test]
    fn fragments_are_unioned_not_overridden() {
        let request = RequestDefinition::new("UpdateUser")
            .with_include(SchemaFragment {
                name: "Timestamps".to_string(),
                required: Some(vec!["updated_at".to_string()]),
                includes: vec![SchemaFragment {
                    name: "Identity".to_string(),
                    required: Some(vec!["id".to_string()]),
                    includes: Vec::new(),
                }],
            })
            .with_required(["name", "id"]);

        let set = RequiredSet::for_request(&request);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["id", "updated_at", "name"]);
    }

    #[test]
    fn fragment_without_required_contributes_nothing() {
        let fragment = SchemaFragment {
            name: "Empty".to_string(),
            ..SchemaFragment::default()
        };
        assert!(RequiredSet::for_fragment(&fragment).is_empty());
    }
}
