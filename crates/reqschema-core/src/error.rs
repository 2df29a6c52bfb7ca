//! Compilation errors

use crate::diagnostic::Diagnostic;

/// Errors that abort a compilation
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// An array node has no item schema
    #[error("Array schema at '{path}' has no item schema")]
    MissingItemSchema { path: String },

    /// A node has no title, property key or binding name
    #[error("Cannot resolve a field name for the schema under '{path}'")]
    UnresolvableName { path: String },

    /// Static declarations and schemas disagree; carries every diagnostic
    #[error("Invalid schema definition in {request}: {}", messages_json(.diagnostics))]
    InconsistentSchemaDeclaration {
        request: String,
        diagnostics: Vec<Diagnostic>,
    },
}

impl CompileError {
    /// Diagnostics carried by an aggregate failure
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::InconsistentSchemaDeclaration { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}

fn messages_json(diagnostics: &[Diagnostic]) -> String {
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    serde_json::to_string(&messages).unwrap_or_else(|_| "Error message parsing failed".to_string())
}
