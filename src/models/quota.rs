//! Per-member shift quotas.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of slots each member may hold in one run.
///
/// Quotas are inputs to the search and are never mutated by it.
/// Members without an entry have a quota of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quotas(HashMap<String, u32>);

impl Quotas {
    /// Creates an empty quota table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a member's quota (builder form).
    pub fn with_quota(mut self, member: impl Into<String>, quota: u32) -> Self {
        self.0.insert(member.into(), quota);
        self
    }

    /// Sets a member's quota.
    pub fn set(&mut self, member: impl Into<String>, quota: u32) {
        self.0.insert(member.into(), quota);
    }

    /// Increments a member's quota by one.
    pub fn bump(&mut self, member: &str) {
        *self.0.entry(member.to_string()).or_insert(0) += 1;
    }

    /// Quota for a member (0 if absent).
    #[inline]
    pub fn get(&self, member: &str) -> u32 {
        self.0.get(member).copied().unwrap_or(0)
    }

    /// Whether a member has an explicit entry.
    pub fn contains(&self, member: &str) -> bool {
        self.0.contains_key(member)
    }

    /// Sum of all quotas.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterates `(member, quota)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no quotas are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u32)> for Quotas {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_lookup() {
        let q = Quotas::new().with_quota("Ana", 2).with_quota("Bob", 1);
        assert_eq!(q.get("Ana"), 2);
        assert_eq!(q.get("Bob"), 1);
        assert_eq!(q.get("Nobody"), 0);
        assert!(!q.contains("Nobody"));
        assert_eq!(q.total(), 3);
    }

    #[test]
    fn test_quota_bump() {
        let mut q = Quotas::new().with_quota("Ana", 2);
        q.bump("Ana");
        q.bump("Cid");
        assert_eq!(q.get("Ana"), 3);
        assert_eq!(q.get("Cid"), 1);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_quota_serde_transparent() {
        let q: Quotas = serde_json::from_str(r#"{"Ana": 2}"#).unwrap();
        assert_eq!(q.get("Ana"), 2);
    }
}
