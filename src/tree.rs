//! Arena-based binary search tree over movie records.
//!
//! Nodes live in a generational arena and reference their children by index,
//! so there are no owned child pointers and traversal never recurses on the
//! hot path. Worst-case depth is O(n) for sorted insertion order; the tree
//! performs no rebalancing.

use std::cmp::Ordering;
use std::collections::HashSet;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::record::Movie;

/// Tree node: one owned record plus optional child indices.
#[derive(Debug)]
pub struct TreeNode {
    pub movie: Movie,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

/// Binary search tree keyed by the movies' derived sort keys.
///
/// Invariant after every insertion: for each node, all keys in the left
/// subtree compare strictly less and all keys in the right subtree strictly
/// greater. No two nodes share a sort key.
#[derive(Debug)]
pub struct MovieTree {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for MovieTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Inserts a movie, preserving the search-tree invariant.
    ///
    /// Descends iteratively: left on smaller key, right on greater. An equal
    /// key is rejected with [`TreeError::DuplicateKey`] before the arena is
    /// touched, so a failed insert leaves the tree exactly as it was.
    #[instrument(level = "trace", skip(self, movie), fields(key = movie.sort_key()))]
    pub fn insert(&mut self, movie: Movie) -> TreeResult<Index> {
        let Some(mut current) = self.root else {
            let idx = self.arena.insert(TreeNode {
                movie,
                left: None,
                right: None,
            });
            self.root = Some(idx);
            return Ok(idx);
        };

        loop {
            let ord = movie.sort_key().cmp(self.arena[current].movie.sort_key());
            let next = match ord {
                Ordering::Less => self.arena[current].left,
                Ordering::Greater => self.arena[current].right,
                Ordering::Equal => {
                    return Err(TreeError::DuplicateKey {
                        key: movie.sort_key().to_string(),
                    })
                }
            };
            match next {
                Some(child) => current = child,
                None => {
                    let idx = self.arena.insert(TreeNode {
                        movie,
                        left: None,
                        right: None,
                    });
                    let parent = &mut self.arena[current];
                    if ord == Ordering::Less {
                        parent.left = Some(idx);
                    } else {
                        parent.right = Some(idx);
                    }
                    return Ok(idx);
                }
            }
        }
    }

    /// In-order iterator yielding movies in ascending sort-key order.
    ///
    /// Each call starts a fresh traversal; the iterator performs no mutation,
    /// so several may run concurrently over one tree.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    /// Movies whose sort key falls within the inclusive bound pair, in
    /// ascending order, deduplicated by movie id.
    ///
    /// Visits every node rather than pruning by bounds: a full O(n) scan
    /// whose correctness does not depend on the tree invariant. See
    /// [`MovieTree::range_subset_pruned`] for the bound-skipping variant.
    #[instrument(level = "debug", skip(self))]
    pub fn range_subset(&self, low: &str, high: &str) -> Vec<&Movie> {
        let mut seen: HashSet<u32> = HashSet::new();
        let mut matches = Vec::new();
        for movie in self.iter() {
            if movie.is_within_range(low, high) && seen.insert(movie.id()) {
                matches.push(movie);
            }
        }
        matches
    }

    /// Same contents and order as [`MovieTree::range_subset`], skipping
    /// subtrees that cannot intersect `[low, high]` (O(log n + k) on a
    /// balanced tree). Opt-in; the unpruned scan remains the default.
    #[instrument(level = "debug", skip(self))]
    pub fn range_subset_pruned(&self, low: &str, high: &str) -> Vec<&Movie> {
        let mut seen: HashSet<u32> = HashSet::new();
        let mut matches = Vec::new();
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, false));
        }

        while let Some((idx, expanded)) = stack.pop() {
            let node = &self.arena[idx];
            if expanded {
                if node.movie.is_within_range(low, high) && seen.insert(node.movie.id()) {
                    matches.push(&node.movie);
                }
                continue;
            }
            let key = node.movie.sort_key();
            // LIFO: push right, self, left to emit in in-order sequence.
            if key < high {
                if let Some(right) = node.right {
                    stack.push((right, false));
                }
            }
            stack.push((idx, true));
            if key > low {
                if let Some(left) = node.left {
                    stack.push((left, false));
                }
            }
        }
        matches
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Renders the tree shape for terminal display, keys at each node.
    pub fn to_display_tree(&self) -> Option<Tree<String>> {
        self.root.map(|root| self.display_node(root))
    }

    fn display_node(&self, idx: Index) -> Tree<String> {
        let node = &self.arena[idx];
        let leaves: Vec<_> = [node.left, node.right]
            .into_iter()
            .flatten()
            .map(|child| self.display_node(child))
            .collect();
        Tree::new(node.movie.sort_key().to_string()).with_leaves(leaves)
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a MovieTree,
    stack: Vec<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a MovieTree) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<Index>) {
        while let Some(idx) = node {
            self.stack.push(idx);
            node = self.tree.arena[idx].left;
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = &'a Movie;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node: &'a TreeNode = self.tree.arena.get(idx)?;
        self.push_left_spine(node.right);
        Some(&node.movie)
    }
}
