//! `:placeholder` substitution
//!
//! `:name` takes the parameter as given, `:Name` capitalizes its first
//! letter and `:NAME` upper-cases it. Tokens without a matching parameter
//! are left untouched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder regex"));

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lookup(token: &str, params: &[(&str, &str)]) -> Option<String> {
    for (name, value) in params {
        if token == *name {
            return Some((*value).to_string());
        }
        if token == upper_first(name) {
            return Some(upper_first(value));
        }
        if token == name.to_uppercase() {
            return Some(value.to_uppercase());
        }
    }
    None
}

/// Substitute parameters into a template
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1], params).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
