//! Message templates shipped with the crate

use reqschema_core::MessageKey;

/// English templates
pub const EN: [(MessageKey, &str); 3] = [
    (MessageKey::ArrayItems, "Each item of :description"),
    (MessageKey::NestedArrayItem, "Row :position of :arrayName: \":description\""),
    (
        MessageKey::NestedArrayItems,
        "Each item of row :position of :arrayName: \":description\"",
    ),
];

/// Japanese templates
pub const JA: [(MessageKey, &str); 3] = [
    (MessageKey::ArrayItems, ":descriptionの各項目"),
    (MessageKey::NestedArrayItem, ":arrayNameの :position 行目の「:description」"),
    (MessageKey::NestedArrayItems, ":arrayNameの :position 行目の「:description」の各項目"),
];

/// Every bundled locale with its templates
pub fn catalogs() -> [(&'static str, &'static [(MessageKey, &'static str)]); 2] {
    [("en", &EN), ("ja", &JA)]
}
