//! Rule-type registry
//!
//! Resolves identifiers from `validation` hints to rule objects. Unknown
//! identifiers pass through to the validator unchanged.

use reqschema_core::{IntegerGuard, Rule, RuleConfig, ValidationRule};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

type RuleFactory = Arc<dyn Fn() -> Arc<dyn ValidationRule> + Send + Sync>;

/// Resolves a rule identifier to a rule
pub trait RuleTypeResolver {
    fn resolve(&self, id: &str) -> Rule;
}

/// Lookup table from identifier to rule factory
#[derive(Clone, Default)]
pub struct RuleRegistry {
    factories: HashMap<String, RuleFactory>,
    aliases: BTreeMap<String, String>,
}

impl RuleRegistry {
    /// Empty registry; every identifier passes through
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in rule objects
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(IntegerGuard::NAME, || IntegerGuard);
        registry
    }

    /// Built-ins plus the aliases from configuration
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut registry = Self::with_builtins();
        for (alias, target) in &config.aliases {
            registry.alias(alias, target);
        }
        registry
    }

    /// Register a rule type under `name`
    pub fn register<R, F>(&mut self, name: impl Into<String>, factory: F)
    where
        R: ValidationRule + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.factories
            .insert(name.into(), Arc::new(move || Arc::new(factory()) as Arc<dyn ValidationRule>));
    }

    /// Make `alias` resolve like `target`
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        let (alias, target) = (alias.into(), target.into());
        if !self.factories.contains_key(&target) {
            tracing::warn!(%alias, %target, "alias points at an unregistered rule type");
        }
        self.aliases.insert(alias, target);
    }

    fn factory(&self, id: &str) -> Option<&RuleFactory> {
        self.factories
            .get(id)
            .or_else(|| self.aliases.get(id).and_then(|target| self.factories.get(target)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factory(id).is_some()
    }

    /// New rule object for `id`, if it is registered
    pub fn instantiate(&self, id: &str) -> Option<Arc<dyn ValidationRule>> {
        self.factory(id).map(|factory| factory())
    }
}

impl RuleTypeResolver for RuleRegistry {
    fn resolve(&self, id: &str) -> Rule {
        match self.instantiate(id) {
            Some(rule) => Rule::Object(rule),
            None => {
                tracing::trace!(%id, "passing rule identifier through");
                Rule::named(id)
            }
        }
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("RuleRegistry")
            .field("rules", &names)
            .field("aliases", &self.aliases)
            .finish()
    }
}
