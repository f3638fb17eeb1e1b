//! Spatial indexing for food queries.
//!
//! Wraps a KD-tree over food positions. The ecosystem rebuilds it from its
//! food map whenever pieces are eaten, so the tree only ever grows in place.

use kdtree::distance::squared_euclidean;
pub use kdtree::ErrorKind as KdTreeError;
use kdtree::KdTree;

use super::geometric_utils::{Segment, Vector};
use super::locatable::EntityId;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f64, EntityId, [f64; 2]>;

/// KD-tree of food positions keyed by entity id.
#[derive(Debug)]
pub struct FoodIndex {
    tree: Tree2D,
}

impl Default for FoodIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            tree: KdTree::new(2),
        }
    }

    /// Builds an index from `(id, position)` pairs.
    pub fn build(items: impl IntoIterator<Item = (EntityId, Vector)>) -> Result<Self, KdTreeError> {
        let mut index = Self::new();
        for (id, position) in items {
            index.insert(id, position)?;
        }
        Ok(index)
    }

    /// Adds a food piece.
    pub fn insert(&mut self, id: EntityId, position: Vector) -> Result<(), KdTreeError> {
        self.tree.add([position.x, position.y], id)
    }

    /// Number of indexed food pieces.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns `true` if no food is indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the food pieces that may lie within `distance` of a segment.
    ///
    /// Searches the circle around the segment's midpoint that contains every
    /// point within `distance` of the segment. Results are sorted by id.
    pub fn candidates_near(&self, segment: &Segment, distance: f64) -> Vec<EntityId> {
        let center = segment.midpoint();
        let radius = segment.length() / 2.0 + distance;
        let mut ids: Vec<EntityId> = self
            .tree
            .within(&[center.x, center.y], radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, &id)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Id of the food piece closest to `position`.
    pub fn nearest(&self, position: Vector) -> Option<EntityId> {
        self.tree
            .nearest(&[position.x, position.y], 1, &squared_euclidean)
            .unwrap_or_default()
            .first()
            .map(|&(_, id)| *id)
    }
}
