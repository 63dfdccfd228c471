use super::{JoinKey, MergedTable};
use std::collections::HashSet;

/// Unpriced (article, brand) pairs collected across every warehouse of a run.
///
/// Pairs are kept unique in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct UnmatchedAccumulator {
    seen: HashSet<JoinKey>,
    keys: Vec<JoinKey>,
}

impl UnmatchedAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: JoinKey) {
        if self.seen.insert(key.clone()) {
            self.keys.push(key);
        }
    }

    /// Add the keys of every row of an unmatched partition
    pub fn extend_from(&mut self, unmatched: &MergedTable) {
        for row in &unmatched.rows {
            self.add(row.key());
        }
    }

    pub fn keys(&self) -> &[JoinKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut acc = UnmatchedAccumulator::new();
        acc.add(JoinKey::new("A", "B"));
        acc.add(JoinKey::new("A", "B"));
        acc.add(JoinKey::new("C", "D"));

        assert_eq!(acc.keys(), &[JoinKey::new("A", "B"), JoinKey::new("C", "D")]);
    }

    #[test]
    fn test_same_article_other_brand_is_distinct() {
        let mut acc = UnmatchedAccumulator::new();
        acc.add(JoinKey::new("1", "KYB"));
        acc.add(JoinKey::new("1", "CTR"));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_new_is_empty() {
        assert!(UnmatchedAccumulator::new().is_empty());
    }
}
