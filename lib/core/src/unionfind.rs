//! Disjoint-set (union-find) over record ids
//!
//! Nodes are created lazily on first reference, `find` compresses paths
//! iteratively (safe on adversarial chain inputs), and `union` always
//! attaches the right root under the left root so that root identity is
//! stable for a given union order within a run.

use ahash::AHashMap;

#[derive(Debug, Default)]
pub struct UnionFind {
    parent: AHashMap<String, String>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids that have been referenced so far
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the root representative for `item`, creating a singleton
    /// entry if the id has never been seen.
    pub fn find(&mut self, item: &str) -> String {
        if !self.parent.contains_key(item) {
            self.parent.insert(item.to_string(), item.to_string());
            return item.to_string();
        }

        let mut root = item.to_string();
        while self.parent[&root] != root {
            root = self.parent[&root].clone();
        }

        // Iterative path compression: repoint every node on the walk.
        let mut current = item.to_string();
        while current != root {
            let next = self.parent[&current].clone();
            self.parent.insert(current, root.clone());
            current = next;
        }

        root
    }

    /// Merge the sets containing `left` and `right`.
    pub fn union(&mut self, left: &str, right: &str) {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root != right_root {
            self.parent.insert(right_root, left_root);
        }
    }

    /// Group every referenced id by its root representative.
    pub fn groups(&mut self) -> AHashMap<String, Vec<String>> {
        let items: Vec<String> = self.parent.keys().cloned().collect();
        let mut grouped: AHashMap<String, Vec<String>> = AHashMap::new();
        for item in items {
            let root = self.find(&item);
            grouped.entry(root).or_default().push(item);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_singleton_creation() {
        let mut uf = UnionFind::new();
        assert!(uf.is_empty());
        assert_eq!(uf.find("a"), "a");
        assert_eq!(uf.len(), 1);
    }

    #[test]
    fn test_union_attaches_right_under_left() {
        let mut uf = UnionFind::new();
        uf.union("a", "b");
        assert_eq!(uf.find("a"), "a");
        assert_eq!(uf.find("b"), "a");
    }

    #[test]
    fn test_transitive_union() {
        let mut uf = UnionFind::new();
        uf.union("a", "b");
        uf.union("b", "c");
        uf.union("d", "e");

        assert_eq!(uf.find("c"), uf.find("a"));
        assert_ne!(uf.find("d"), uf.find("a"));
    }

    #[test]
    fn test_groups_partition_all_ids() {
        let mut uf = UnionFind::new();
        uf.union("a", "b");
        uf.union("c", "d");
        uf.union("a", "c");
        uf.union("x", "y");

        let groups = uf.groups();
        assert_eq!(groups.len(), 2);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 6);

        let mut abcd = groups[&uf.find("a")].clone();
        abcd.sort();
        assert_eq!(abcd, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_deep_chain_compression() {
        let mut uf = UnionFind::new();
        let ids: Vec<String> = (0..10_000).map(|i| format!("id_{i:05}")).collect();
        for pair in ids.windows(2) {
            uf.union(&pair[0], &pair[1]);
        }

        // Must not overflow the stack and must resolve to the chain head.
        assert_eq!(uf.find(&ids[ids.len() - 1]), ids[0]);
        assert_eq!(uf.groups().len(), 1);
    }
}
