//! Naming convention conversions for generated identifiers
//!
//! Strategies call these explicitly at every site that needs a particular
//! casing of a raw name, e.g. `OrderLine` → `orderLine` for a local variable or
//! `OrderLines` for a folder.

use once_cell::sync::Lazy;
use regex::Regex;

/// `fooBar` / `foo1Bar` boundaries
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// `HTTPResponse` → `HTTP Response` boundaries
static ACRONYM_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));

/// Converts raw names into the casings used by generated code.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConventionConverter;

impl NamingConventionConverter {
    pub fn new() -> Self {
        Self
    }

    /// Splits a name into words on case changes, digits-to-upper boundaries
    /// and any non-alphanumeric separator.
    ///
    /// # Examples
    /// ```
    /// use strategen::core::naming::NamingConventionConverter;
    ///
    /// let naming = NamingConventionConverter::new();
    /// assert_eq!(naming.words("getHTTPResponse"), vec!["get", "HTTP", "Response"]);
    /// assert_eq!(naming.words("order-line_item"), vec!["order", "line", "item"]);
    /// ```
    pub fn words(&self, s: &str) -> Vec<String> {
        let spaced = ACRONYM_WORD.replace_all(s, "$1 $2");
        let spaced = LOWER_UPPER.replace_all(&spaced, "$1 $2");

        spaced
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// `order_line` → `OrderLine`
    pub fn to_pascal_case(&self, s: &str) -> String {
        self.words(s).iter().map(|w| capitalize(w)).collect()
    }

    /// `OrderLine` → `orderLine`
    pub fn to_camel_case(&self, s: &str) -> String {
        self.words(s)
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == 0 {
                    w.to_lowercase()
                } else {
                    capitalize(w)
                }
            })
            .collect()
    }

    /// `OrderLine` → `order_line`
    pub fn to_snake_case(&self, s: &str) -> String {
        self.join_lowercase(s, "_")
    }

    /// `OrderLine` → `order-line`
    pub fn to_kebab_case(&self, s: &str) -> String {
        self.join_lowercase(s, "-")
    }

    /// Pluralizes the last word of a name, keeping the rest untouched.
    ///
    /// Handles the common English suffix rules (`Category` → `Categories`,
    /// `Box` → `Boxes`, `Order` → `Orders`) and a couple of irregular nouns.
    pub fn to_plural(&self, s: &str) -> String {
        if s.is_empty() {
            return String::new();
        }

        let lower = s.to_lowercase();
        if lower.ends_with("person") {
            let start = s.len() - "person".len();
            return format!("{}{}eople", &s[..start], &s[start..start + 1]);
        }
        if lower.ends_with("child") {
            return format!("{s}ren");
        }

        let mut chars = lower.chars().rev();
        let last = chars.next();
        let before_last = chars.next();

        match (before_last, last) {
            (Some(prev), Some('y')) if !is_vowel(prev) => {
                let stem = &s[..s.len() - 1];
                let suffix = if s.ends_with('Y') { "IES" } else { "ies" };
                format!("{stem}{suffix}")
            }
            (_, Some('s' | 'x' | 'z')) => format!("{s}es"),
            (Some('c' | 's'), Some('h')) => format!("{s}es"),
            _ => format!("{s}s"),
        }
    }

    fn join_lowercase(&self, s: &str, separator: &str) -> String {
        self.words(s)
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
