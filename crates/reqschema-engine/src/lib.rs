//! reqschema engine - schema to validation rule compilers
//!
//! This crate turns schema trees into the two artifacts a request
//! validator consumes:
//! - a dotted path to rule list mapping ([`RuleSet`])
//! - a dotted path to human-readable label mapping ([`LabelTable`])
//!
//! It also merges parameter bindings into schemas and checks schemas
//! against the static field declarations they describe.

pub mod consistency;
pub mod hints;
pub mod labels;
pub mod merge;
pub mod path;
pub mod registry;
pub mod request;
pub mod required;
pub mod rules;

pub use consistency::ConsistencyChecker;
pub use hints::{ConstraintKind, ExtensionHints};
pub use labels::{LabelCompiler, LabelTable};
pub use merge::{merge_binding, merge_tree};
pub use path::{FieldPath, PathBuilder, ResolvedPath, WILDCARD};
pub use registry::{RuleRegistry, RuleTypeResolver};
pub use request::{CompiledRequest, RequestCompiler};
pub use required::RequiredSet;
pub use rules::{RuleCompiler, RuleSet};
