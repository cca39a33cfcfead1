use crate::types::Face;
use std::collections::BTreeMap;

/// Label-keyed reference faces for one slot.
///
/// Deduplication is the caller's job; this layer keeps whatever it is given
/// in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReferenceRegistry {
    buckets: BTreeMap<String, Vec<Face>>,
}

impl ReferenceRegistry {
    pub fn append(&mut self, label: &str, face: Face) {
        self.buckets.entry(label.to_string()).or_default().push(face);
    }

    /// Remove the first entry under `label` equal to `face`.
    ///
    /// Returns whether anything was removed; a missing label or value is not
    /// an error.
    pub fn delete(&mut self, label: &str, face: &Face) -> bool {
        let Some(bucket) = self.buckets.get_mut(label) else {
            return false;
        };
        match bucket.iter().position(|existing| existing == face) {
            Some(pos) => {
                bucket.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Face]> {
        self.buckets.get(label).map(Vec::as_slice)
    }

    /// Flatten every bucket (labels in ascending order) into one matching set.
    pub fn materialize(&self) -> Vec<Face> {
        self.buckets.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when no face is stored under any label.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::face;

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut registry = ReferenceRegistry::default();
        registry.append("reference_face", face(1.0, 0.9));
        registry.append("reference_face", face(2.0, 0.9));
        registry.append("reference_face", face(1.0, 0.9));

        assert_eq!(
            registry.get("reference_face").unwrap(),
            &[face(1.0, 0.9), face(2.0, 0.9), face(1.0, 0.9)]
        );
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let mut registry = ReferenceRegistry::default();
        registry.append("a", face(1.0, 0.9));
        registry.append("a", face(2.0, 0.9));
        registry.append("a", face(1.0, 0.9));

        assert!(registry.delete("a", &face(1.0, 0.9)));
        assert_eq!(registry.get("a").unwrap(), &[face(2.0, 0.9), face(1.0, 0.9)]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut registry = ReferenceRegistry::default();
        registry.append("a", face(1.0, 0.9));

        assert!(!registry.delete("b", &face(1.0, 0.9)));
        assert!(!registry.delete("a", &face(9.0, 0.9)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_materialize_flattens_all_labels() {
        let mut registry = ReferenceRegistry::default();
        registry.append("b", face(3.0, 0.9));
        registry.append("a", face(1.0, 0.9));
        registry.append("a", face(2.0, 0.9));

        assert_eq!(
            registry.materialize(),
            vec![face(1.0, 0.9), face(2.0, 0.9), face(3.0, 0.9)]
        );
    }

    #[test]
    fn test_emptied_bucket_counts_as_empty() {
        let mut registry = ReferenceRegistry::default();
        registry.append("a", face(1.0, 0.9));
        registry.delete("a", &face(1.0, 0.9));

        assert!(registry.is_empty());
        assert!(registry.materialize().is_empty());
    }
}
