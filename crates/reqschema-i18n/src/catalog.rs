//! Locale-aware message catalog
//!
//! Looks templates up in the active locale, then in the fallback locale,
//! and finally degrades to the raw message key. Lookup misses are never
//! errors.

use reqschema_core::{Config, MessageFormatter, MessageKey};
use std::collections::HashMap;

use crate::bundled;
use crate::placeholder::render;

/// Message templates per locale
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    locale: String,
    fallback_locale: String,
    templates: HashMap<String, HashMap<MessageKey, String>>,
}

impl LocaleCatalog {
    /// Catalog with the bundled templates loaded
    pub fn new(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        let mut catalog = Self::empty(locale, fallback_locale);
        for (locale, templates) in bundled::catalogs() {
            for (key, template) in templates {
                catalog.insert(locale, *key, *template);
            }
        }
        catalog
    }

    /// Catalog without any templates
    pub fn empty(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback_locale: fallback_locale.into(),
            templates: HashMap::new(),
        }
    }

    /// Bundled catalog with the locales and overrides from a config
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::new(config.locale.clone(), config.fallback_locale.clone());

        for (locale, templates) in &config.messages {
            for (name, template) in templates {
                match MessageKey::from_name(name) {
                    Some(key) => catalog.insert(locale, key, template.clone()),
                    None => tracing::warn!(
                        locale = %locale,
                        key = %name,
                        "ignoring unknown message key"
                    ),
                }
            }
        }

        catalog
    }

    /// Add or replace a template
    pub fn insert(&mut self, locale: &str, key: MessageKey, template: impl Into<String>) {
        self.templates
            .entry(locale.to_string())
            .or_default()
            .insert(key, template.into());
    }

    /// Switch the active locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Active locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Fallback locale
    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    fn lookup(&self, locale: &str, key: MessageKey) -> Option<&str> {
        self.templates
            .get(locale)
            .and_then(|templates| templates.get(&key))
            .map(String::as_str)
    }

    /// Template for a key, honoring the fallback locale
    pub fn template(&self, key: MessageKey) -> Option<&str> {
        self.lookup(&self.locale, key).or_else(|| {
            tracing::debug!(
                locale = %self.locale,
                fallback = %self.fallback_locale,
                %key,
                "message missing, using fallback locale"
            );
            self.lookup(&self.fallback_locale, key)
        })
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::new("en", "ja")
    }
}

impl MessageFormatter for LocaleCatalog {
    fn format(&self, key: MessageKey, params: &[(&str, &str)]) -> String {
        match self.template(key) {
            Some(template) => render(template, params),
            None => key.as_str().to_string(),
        }
    }
}
