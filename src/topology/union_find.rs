//! Disjoint-Set Forest with Directional Merge
//!
//! Tracks connected components while a filtration is swept. Unlike a
//! classic union-by-rank structure, `merge(u, v)` is deliberately
//! asymmetric: the component of `u` is hung below the root of `v`, so
//! the caller decides which representative survives. The persistence
//! engines use this to implement the elder rule without bookkeeping
//! beyond the parent array.
//!
//! Indices are `0..n`; anything outside that range is a caller bug and
//! panics on the slice access.

/// Incremental connectivity tracker over `n` elements
#[derive(Debug, Clone)]
pub struct DisjointSetForest {
    parent: Vec<usize>,
}

impl DisjointSetForest {
    /// Create a forest of `n` singleton components
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the component containing `u`.
    ///
    /// Full path compression: every node visited on the way up is
    /// re-pointed at the root.
    pub fn find(&mut self, u: usize) -> usize {
        let mut root = u;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = u;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the component of `u` into the component of `v`.
    ///
    /// Afterwards both elements resolve to the previous root of `v`,
    /// irrespective of component sizes.
    pub fn merge(&mut self, u: usize, v: usize) {
        if u == v {
            return;
        }
        let ru = self.find(u);
        let rv = self.find(v);
        if ru != rv {
            self.parent[ru] = rv;
        }
    }

    /// Elements that are their own parent, in index order.
    ///
    /// After a sweep these are the components that were never merged
    /// into anything and hence never destroyed.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .map(|(i, _)| i)
    }

    /// Number of components
    pub fn n_components(&self) -> usize {
        self.roots().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut forest = DisjointSetForest::new(4);
        for i in 0..4 {
            assert_eq!(forest.find(i), i);
        }
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_merge_is_directional() {
        let mut forest = DisjointSetForest::new(3);
        forest.merge(0, 1);
        assert_eq!(forest.find(0), 1);

        // A larger component still goes under the target root
        forest.merge(1, 2);
        assert_eq!(forest.find(0), 2);
        assert_eq!(forest.find(1), 2);

        let mut reversed = DisjointSetForest::new(3);
        reversed.merge(1, 0);
        reversed.merge(2, 0);
        assert_eq!(reversed.roots().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_merge_within_component_is_noop() {
        let mut forest = DisjointSetForest::new(3);
        forest.merge(0, 1);
        forest.merge(0, 1);
        forest.merge(1, 0);
        forest.merge(2, 2);
        assert_eq!(forest.find(0), 1);
        assert_eq!(forest.n_components(), 2);
    }

    #[test]
    fn test_path_compression() {
        let mut forest = DisjointSetForest::new(5);
        // Chain 0 -> 1 -> 2 -> 3 -> 4
        for i in 0..4 {
            forest.parent[i] = i + 1;
        }
        assert_eq!(forest.find(0), 4);
        assert!(forest.parent[..4].iter().all(|&p| p == 4));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let mut forest = DisjointSetForest::new(2);
        forest.find(2);
    }
}
