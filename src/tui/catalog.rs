//! String catalog used to display localized labels.

use crate::element::LocalizedKey;
use std::collections::{BTreeMap, HashMap};

/// Maps label keys to display text. Unknown keys display as themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn resolve<'a>(&'a self, key: &'a LocalizedKey) -> &'a str {
        self.entries
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_fallback() {
        let mut catalog = Catalog::default();
        catalog.insert("demo.refresh", "Refresh feed");

        assert_eq!(catalog.resolve(&LocalizedKey::new("demo.refresh")), "Refresh feed");
        assert_eq!(catalog.resolve(&LocalizedKey::new("demo.missing")), "demo.missing");
    }
}
