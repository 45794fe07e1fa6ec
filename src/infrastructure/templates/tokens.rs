//! Token maps handed to the template processor

use std::collections::BTreeMap;

use crate::core::naming::NamingConventionConverter;

/// Named values substituted into `{{ token }}` placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    tokens: BTreeMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain token
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a name token together with its casing views.
    ///
    /// For `with_name("entityName", "order_line", ..)` the map gains
    /// `entityName`, `entityNamePascalCase` (`OrderLine`), `entityNameCamelCase`
    /// (`orderLine`), `entityNameSnakeCase`, `entityNameKebabCase`,
    /// `entityNamePascalCasePlural` (`OrderLines`) and
    /// `entityNameCamelCasePlural` (`orderLines`).
    pub fn with_name(
        mut self,
        key: &str,
        value: &str,
        naming: &NamingConventionConverter,
    ) -> Self {
        let pascal = naming.to_pascal_case(value);
        let camel = naming.to_camel_case(value);

        self.insert(key, value);
        self.insert(format!("{key}PascalCasePlural"), naming.to_plural(&pascal));
        self.insert(format!("{key}CamelCasePlural"), naming.to_plural(&camel));
        self.insert(format!("{key}PascalCase"), pascal);
        self.insert(format!("{key}CamelCase"), camel);
        self.insert(format!("{key}SnakeCase"), naming.to_snake_case(value));
        self.insert(format!("{key}KebabCase"), naming.to_kebab_case(value));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
