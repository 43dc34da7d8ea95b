//! Utility functions for code generation.

use convert_case::{Case, Casing};
use regex::Regex;
use std::sync::OnceLock;

/// Convert a string to camelCase
pub fn to_camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

/// Convert a string to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Convert a field name to a human label: `first_name` -> `First Name`
pub fn to_label(s: &str) -> String {
    s.to_case(Case::Title)
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"))
}

/// Whether `s` can be used verbatim as a TypeScript identifier
pub fn is_ts_identifier(s: &str) -> bool {
    identifier_regex().is_match(s)
}

/// Escape a string for use inside a single-quoted TypeScript literal
pub fn escape_ts_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Single-quoted TypeScript string literal
pub fn ts_string(s: &str) -> String {
    format!("'{}'", escape_ts_string(s))
}

/// Object key for interface/object-literal position: bare when possible, quoted otherwise
pub fn ts_property_key(name: &str) -> String {
    if is_ts_identifier(name) {
        name.to_string()
    } else {
        ts_string(name)
    }
}

/// Member access expression: `obj.name` or `obj['na me']`
pub fn ts_member(object: &str, name: &str) -> String {
    if is_ts_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, ts_string(name))
    }
}

/// Identifier-safe suffix for locally generated names (handlers, ids)
pub fn ts_local_suffix(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let cleaned: String = pascal
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "Field".to_string()
    } else if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("F{}", cleaned)
    } else {
        cleaned
    }
}

/// Escape text placed between JSX tags
pub fn escape_jsx_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_camel_case("BlogPosts"), "blogPosts");
        assert_eq!(to_pascal_case("blog_posts"), "BlogPosts");
        assert_eq!(to_label("first_name"), "First Name");
    }

    #[test]
    fn test_is_ts_identifier() {
        assert!(is_ts_identifier("title"));
        assert!(is_ts_identifier("_id"));
        assert!(!is_ts_identifier("first name"));
        assert!(!is_ts_identifier("2fa"));
    }

    #[test]
    fn test_escape_ts_string() {
        assert_eq!(escape_ts_string("it's"), "it\\'s");
        assert_eq!(ts_string("a\nb"), "'a\\nb'");
    }

    #[test]
    fn test_ts_member() {
        assert_eq!(ts_member("item", "title"), "item.title");
        assert_eq!(ts_member("item", "first name"), "item['first name']");
        assert_eq!(ts_property_key("first name"), "'first name'");
    }

    #[test]
    fn test_ts_local_suffix() {
        assert_eq!(ts_local_suffix("first name"), "FirstName");
        assert!(ts_local_suffix("2fa").starts_with('F'));
    }
}
