use serde::{Deserialize, Serialize};

use crate::NodeName;

/// Discovery filter state carried by a fleet client.
///
/// `compound` holds predicate clauses (e.g. `"enabled=true"`) that restrict
/// discovery; `identity` pins discovery and status calls to named nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compound: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identity: Vec<NodeName>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no compound clause has been applied.
    #[inline]
    pub fn compound_is_empty(&self) -> bool {
        self.compound.is_empty()
    }

    pub fn push_compound(&mut self, predicate: impl Into<String>) {
        self.compound.push(predicate.into());
    }

    pub fn push_identity(&mut self, name: impl Into<NodeName>) {
        self.identity.push(name.into());
    }

    /// Drop every clause, returning the filter to its pristine state.
    pub fn clear(&mut self) {
        self.compound.clear();
        self.identity.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_filter_is_empty() {
        let filter = Filter::new();
        assert!(filter.compound_is_empty());
        assert!(filter.identity.is_empty());
    }

    #[test]
    fn clear_drops_all_clauses() {
        let mut filter = Filter::new();
        filter.push_compound("enabled=true");
        filter.push_identity("node-1");
        assert!(!filter.compound_is_empty());

        filter.clear();
        assert!(filter.compound_is_empty());
        assert!(filter.identity.is_empty());
    }

    #[test]
    fn empty_filter_serializes_to_empty_object() {
        let json = serde_json::to_string(&Filter::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
