//! Localized message formatting interface
//!
//! The label compiler asks a [`MessageFormatter`] for every piece of
//! localized phrasing; it never builds these strings itself.

/// Placeholder the validator fills with the row number of an array item
pub const POSITION_PLACEHOLDER: &str = ":position";

/// Message keys used for array labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// "Each item of :description"
    ArrayItems,

    /// "Row :position of :arrayName: \":description\""
    NestedArrayItem,

    /// "Each item of row :position of :arrayName: \":description\""
    NestedArrayItems,
}

impl MessageKey {
    pub const ALL: [MessageKey; 3] = [
        Self::ArrayItems,
        Self::NestedArrayItem,
        Self::NestedArrayItems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArrayItems => "array_items",
            Self::NestedArrayItem => "nested_array_item",
            Self::NestedArrayItems => "nested_array_items",
        }
    }

    /// Look a key up by its string form
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Produces localized text for a message key
///
/// Implementations resolve locales and fallbacks themselves and must not
/// fail: a total lookup miss returns the raw key.
pub trait MessageFormatter {
    fn format(&self, key: MessageKey, params: &[(&str, &str)]) -> String;

    /// Label for the `.*` entry of an array
    fn array_items_label(&self, description: &str) -> String {
        self.format(MessageKey::ArrayItems, &[("description", description)])
    }

    /// Label for a field inside an array item
    fn nested_array_item_label(&self, array_name: &str, description: &str) -> String {
        self.format(
            MessageKey::NestedArrayItem,
            &[
                ("arrayName", array_name),
                ("description", description),
                ("position", POSITION_PLACEHOLDER),
            ],
        )
    }

    /// Label for the `.*` entry of an array inside an array item
    fn nested_array_items_label(&self, array_name: &str, description: &str) -> String {
        self.format(
            MessageKey::NestedArrayItems,
            &[
                ("arrayName", array_name),
                ("description", description),
                ("position", POSITION_PLACEHOLDER),
            ],
        )
    }
}
