//! Consistency checks between static field declarations and schemas
//!
//! Every field is checked and every mismatch is reported; callers decide
//! whether a non-empty result aborts compilation.

use reqschema_core::{
    DeclaredType, Diagnostic, DiagnosticCode, FieldDefinition, SchemaKind, SchemaNode,
};

/// Compares a field's declared type with its resolved schema
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Check one field against the merged schema that describes it
    pub fn check_field(field: &FieldDefinition, schema: &SchemaNode) -> Vec<Diagnostic> {
        Self::check(&field.name, &field.declared, schema.kind, schema.is_nullable())
    }

    /// Run both checks; each contributes at most one diagnostic
    pub fn check(
        field: &str,
        declared: &DeclaredType,
        schema_kind: Option<SchemaKind>,
        schema_nullable: bool,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if declared.nullable != schema_nullable {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::NullabilityMismatch,
                    field,
                    format!(
                        "{}: Nullable definitions are different in property and schema.",
                        field
                    ),
                )
                .with_comparison(nullability(declared.nullable), nullability(schema_nullable)),
            );
        }

        if !types_compatible(declared, schema_kind) {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::TypeMismatch,
                    field,
                    format!("{}: Type definitions are different in property and schema.", field),
                )
                .with_comparison(
                    declared.type_name.clone(),
                    schema_kind.map_or("untyped", |kind| kind.as_str()),
                ),
            );
        }

        diagnostics
    }
}

fn nullability(nullable: bool) -> &'static str {
    if nullable {
        "nullable"
    } else {
        "not nullable"
    }
}

/// Array declarations accept array and object schemas; anything else needs
/// the schema type to start with the declared name (`int` matches `integer`).
/// An untyped schema only conflicts with an array declaration.
fn types_compatible(declared: &DeclaredType, schema_kind: Option<SchemaKind>) -> bool {
    if declared.is_array() {
        return schema_kind.is_some_and(|kind| kind.is_container());
    }

    match schema_kind {
        Some(kind) => kind.as_str().starts_with(declared.type_name.as_str()),
        None => true,
    }
}
