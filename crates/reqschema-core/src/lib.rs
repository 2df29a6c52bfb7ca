//! reqschema core
//!
//! Core domain model shared by the compilers: schema nodes, request
//! definitions, validation rules, diagnostics and configuration.
//! Never rename diagnostic codes - they are part of the public API.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod message;
pub mod report;
pub mod request;
pub mod rule;
pub mod schema;

pub use config::{Config, ConfigError, RuleConfig};
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use error::CompileError;
pub use message::{MessageFormatter, MessageKey, POSITION_PLACEHOLDER};
pub use report::{Report, ReportSummary, ReportVersion};
pub use request::{
    DeclaredType, DeclaredTypeError, FieldDefinition, RequestDefinition, SchemaFragment,
};
pub use rule::{IntegerGuard, Rule, TypeRule, ValidationRule};
pub use schema::{Binding, Constraints, Enumeration, Extensions, SchemaKind, SchemaNode};
