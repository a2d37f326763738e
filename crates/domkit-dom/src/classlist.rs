//! DOMTokenList (classList)
//!
//! Ordered set of class tokens backing `Element.classList`.

use std::fmt;

/// Space-separated token set, duplicates collapsed on parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a `class` attribute value
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_ascii_whitespace() {
            if !list.contains(token) {
                list.tokens.push(token.to_string());
            }
        }
        list
    }

    /// Number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s); already present tokens keep their position
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Remove token(s); absent tokens are ignored
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle token, returns whether it is present afterwards
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = self.contains(token);
        let want = force.unwrap_or(!present);
        if want && !present {
            self.add(&[token]);
        } else if !want && present {
            self.remove(&[token]);
        }
        want
    }

    /// Replace token in place
    pub fn replace(&mut self, old_token: &str, new_token: &str) -> bool {
        let Some(pos) = self.tokens.iter().position(|t| t == old_token) else {
            return false;
        };
        if self.contains(new_token) {
            self.tokens.remove(pos);
        } else {
            self.tokens[pos] = new_token.to_string();
        }
        true
    }

    /// Serialized value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Re-parse from string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_collapses_duplicates() {
        let list = DOMTokenList::from_string("  menu hover  menu ");
        assert_eq!(list.length(), 2);
        assert_eq!(list.value(), "menu hover");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = DOMTokenList::from_string("menu");
        list.remove(&["hover"]);
        assert_eq!(list.value(), "menu");
    }

    #[test]
    fn test_toggle_force() {
        let mut list = DOMTokenList::new();
        assert!(list.toggle("hover", None));
        assert!(list.toggle("hover", Some(true)));
        assert_eq!(list.length(), 1);
        assert!(!list.toggle("hover", Some(false)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_replace_merges_existing() {
        let mut list = DOMTokenList::from_string("a b c");
        assert!(list.replace("a", "c"));
        assert_eq!(list.value(), "b c");
        assert!(!list.replace("zzz", "y"));
    }
}
