//! Integration tests for whole request definitions

use pretty_assertions::assert_eq;
use reqschema_core::{CompileError, DiagnosticCode, RequestDefinition};
use reqschema_engine::{RequestCompiler, RuleRegistry};
use reqschema_i18n::LocaleCatalog;
use serde_json::{json, Value};

fn definition(value: Value) -> RequestDefinition {
    serde_json::from_value(value).unwrap()
}

fn compile(value: Value) -> Result<Value, CompileError> {
    let registry = RuleRegistry::with_builtins();
    let catalog = LocaleCatalog::new("en", "ja");
    let compiled = RequestCompiler::new(&registry, &catalog).compile(&definition(value))?;
    Ok(serde_json::to_value(compiled).unwrap())
}

#[test]
fn array_of_objects_rules_and_labels() {
    let compiled = compile(json!({
        "name": "StoreOrder",
        "required": ["items"],
        "fields": [{
            "name": "items",
            "type": "array",
            "schema": {
                "title": "items",
                "type": "array",
                "minItems": 1,
                "items": {
                    "required": ["code"],
                    "properties": [
                        { "title": "code", "type": "string", "maxLength": 8 },
                        { "title": "quantity", "type": "integer", "minimum": 1 }
                    ]
                }
            }
        }]
    }))
    .unwrap();

    assert_eq!(
        compiled,
        json!({
            "rules": {
                "items": ["present", "array", "min:1"],
                "items.*.code": ["required_with:items.*", "string", "max:8"],
                "items.*.quantity": ["integer_guard", "integer", "min:1"]
            },
            "labels": {
                "items": "items",
                "items.*": "Each item of items",
                "items.*.code": "Row :position of items: \"code\"",
                "items.*.quantity": "Row :position of items: \"quantity\""
            }
        })
    );
}

#[test]
fn composed_fragments_contribute_required_names() {
    let compiled = compile(json!({
        "name": "UpdateProfile",
        "includes": [{
            "name": "Identified",
            "required": ["id"],
            "includes": [{ "name": "Versioned", "required": ["version"] }]
        }],
        "fields": [
            { "name": "id", "type": "int", "schema": { "type": "integer" } },
            { "name": "version", "type": "int", "schema": { "type": "integer" } },
            { "name": "bio", "type": "?string", "schema": { "type": "string", "nullable": true } }
        ]
    }))
    .unwrap();

    assert_eq!(
        compiled["rules"],
        json!({
            "id": ["required", "integer_guard", "integer"],
            "version": ["required", "integer_guard", "integer"],
            "bio": ["nullable", "string"]
        })
    );
}

#[test]
fn parameter_binding_is_merged_before_compiling() {
    let compiled = compile(json!({
        "name": "SearchProducts",
        "fields": [{
            "name": "codes",
            "type": "array",
            "schema": {
                "type": "array",
                "maxItems": 10,
                "items": { "type": "string", "pattern": "^[A-Z]{3}$" }
            },
            "binding": {
                "name": "Code[]",
                "in": "query",
                "required": true,
                "description": "product codes"
            }
        }]
    }))
    .unwrap();

    assert_eq!(
        compiled,
        json!({
            "rules": {
                "Code": ["present", "array", "max:10"],
                "Code.*": ["string", "regex:/^[A-Z]{3}$/"]
            },
            "labels": {
                "Code": "product codes",
                "Code.*": "Each item of product codes"
            }
        })
    );
}

#[test]
fn extension_hints_shape_rules() {
    let compiled = compile(json!({
        "name": "Upload",
        "fields": [
            {
                "name": "birthday",
                "type": "string",
                "schema": {
                    "type": "string",
                    "maxLength": 8,
                    "minLength": 8,
                    "pattern": "^[0-9]{8}$",
                    "x": { "date_format": "Ymd" }
                }
            },
            {
                "name": "avatar",
                "type": "string",
                "schema": { "type": "string", "x": { "mimes": ["jpg", "png"] } }
            },
            {
                "name": "status",
                "type": "string",
                "schema": {
                    "type": "string",
                    "enum": "App\\Enums\\Status",
                    "x": { "validation": ["integer_guard", "alpha_dash"] }
                }
            }
        ]
    }))
    .unwrap();

    assert_eq!(
        compiled["rules"],
        json!({
            "birthday": ["string", "date_format:Ymd"],
            "avatar": ["file", "mimes:jpg,png"],
            "status": ["string", "integer_guard", "alpha_dash", "enum:App\\Enums\\Status"]
        })
    );
}

#[test]
fn nullable_declaration_conflicts_with_schema() {
    let err = compile(json!({
        "name": "Conflict",
        "fields": [{
            "name": "x",
            "type": "?int",
            "schema": { "type": "integer", "nullable": false }
        }]
    }))
    .unwrap_err();

    let diagnostics = err.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::NullabilityMismatch);
    assert_eq!(diagnostics[0].field, "x");
    assert_eq!(
        err.to_string(),
        r#"Invalid schema definition in Conflict: ["x: Nullable definitions are different in property and schema."]"#
    );
}

#[test]
fn japanese_labels() {
    let registry = RuleRegistry::with_builtins();
    let catalog = LocaleCatalog::new("ja", "en");
    let request = definition(json!({
        "name": "StoreOrder",
        "fields": [{
            "name": "items",
            "type": "array",
            "schema": {
                "type": "array",
                "description": "明細",
                "items": {
                    "properties": [
                        { "property": "code", "type": "string", "description": "コード" }
                    ]
                }
            }
        }]
    }));

    let compiled = RequestCompiler::new(&registry, &catalog).compile(&request).unwrap();
    assert_eq!(compiled.labels.get("items.*"), Some("明細の各項目"));
    assert_eq!(
        compiled.labels.get("items.*.code"),
        Some("明細の :position 行目の「コード」")
    );
}

#[test]
fn definitions_file_with_several_requests() {
    let definitions = RequestDefinition::from_json(
        r#"[
            { "name": "A", "fields": [{ "name": "a", "type": "bool", "schema": { "type": "boolean" } }] },
            { "name": "B", "fields": [{ "name": "b", "type": "float", "schema": { "type": "number" } }] }
        ]"#,
    )
    .unwrap();

    let registry = RuleRegistry::with_builtins();
    let catalog = LocaleCatalog::default();
    let compiler = RequestCompiler::new(&registry, &catalog);

    assert!(compiler.compile(&definitions[0]).is_ok());

    // `number` does not start with `float`
    let diagnostics = compiler.check(&definitions[1]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::TypeMismatch);
}
