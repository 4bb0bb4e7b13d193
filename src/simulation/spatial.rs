//! Spatial queries: nearest neighbor with wrap-folded distance, and vision lookups.
//!
//! The field is not a true torus. Distances longer than half the field diagonal
//! are folded (`span - d`) and the bearing is inverted, which approximates
//! reaching the target across the seam without ever wrapping positions.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;

use super::entity::{EntityId, Population};
use super::error::SimError;
use super::geometry::{Bounds, Direction, Point};

/// Type alias for the 2D kd-tree used for vision queries.
pub type Tree2D = KdTree<f32, usize, [f32; 2]>;

/// Result of a nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<K = EntityId> {
    /// The closest candidate, if any survived the filter.
    pub found: Option<K>,
    /// Wrap-folded distance to `found`; zero when nothing was found.
    pub distance: f32,
}

impl<K> Nearest<K> {
    /// The "nothing found" sentinel.
    pub const NONE: Self = Self {
        found: None,
        distance: 0.0,
    };
}

/// Folds a raw distance against the field diagonal.
///
/// Returns the effective distance and whether folding happened. The result
/// never exceeds `span / 2` for raw distances within `[0, span]`.
pub fn fold_distance(distance: f32, span: f32) -> (f32, bool) {
    if distance > span / 2.0 {
        (span - distance, true)
    } else {
        (distance, false)
    }
}

/// Direction and folded distance from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bearing {
    /// Unit vector toward the target, inverted when the distance was folded.
    pub direction: Direction,
    /// Wrap-folded distance.
    pub distance: f32,
    /// Whether the raw distance exceeded half the span.
    pub folded: bool,
}

/// Computes the wrap-corrected bearing from `origin` to `target`.
pub fn bearing(origin: Point, target: Point, bounds: &Bounds) -> Bearing {
    let toward = Direction::from_points(origin, target);
    let (distance, folded) = fold_distance(origin.distance(target), bounds.span());
    Bearing {
        direction: if folded { -toward } else { toward },
        distance,
        folded,
    }
}

/// Finds the candidate closest to `origin` under the wrap-folded metric.
///
/// Candidates rejected by `include` are skipped. Ties go to the first
/// candidate encountered, so iteration order must be stable.
pub fn closest_to<K, I, F>(origin: Point, candidates: I, bounds: &Bounds, mut include: F) -> Nearest<K>
where
    K: Copy,
    I: IntoIterator<Item = (K, Point)>,
    F: FnMut(K) -> bool,
{
    let span = bounds.span();
    let mut best: Nearest<K> = Nearest::NONE;
    let mut best_distance = f32::INFINITY;

    for (key, pos) in candidates {
        if !include(key) {
            continue;
        }
        let (distance, _) = fold_distance(origin.distance(pos), span);
        if distance < best_distance {
            best_distance = distance;
            best = Nearest {
                found: Some(key),
                distance,
            };
        }
    }

    best
}

/// Whether an actor exactly at the vision radius is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionEdge {
    /// Only strictly closer than the radius.
    Exclusive,
    /// Up to and including the radius.
    Inclusive,
}

impl VisionEdge {
    fn admits(self, distance: f32, radius: f32) -> bool {
        match self {
            VisionEdge::Exclusive => distance < radius,
            VisionEdge::Inclusive => distance <= radius,
        }
    }
}

/// Kd-tree snapshot of one population, rebuilt at the start of each advance.
pub struct VisionIndex {
    tree: Tree2D,
    entries: Vec<(EntityId, Point)>,
}

impl VisionIndex {
    /// Builds an index over every entity currently in `population`.
    pub fn build(population: &Population) -> Result<Self, SimError> {
        let mut tree: Tree2D = KdTree::new(2);
        let mut entries = Vec::with_capacity(population.len());
        for (order, (id, entity)) in population.iter().enumerate() {
            tree.add([entity.pos.x, entity.pos.y], order)
                .map_err(|e| SimError::Spatial(format!("{e:?}")))?;
            entries.push((id, entity.pos));
        }
        Ok(Self { tree, entries })
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the indexed population was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of entities within `radius` of `origin`, in population order.
    pub fn within(&self, origin: Point, radius: f32, edge: VisionEdge) -> Result<Vec<EntityId>, SimError> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        // slightly wider than `radius`; the exact edge test happens below
        let reach = radius * (1.0 + 1e-4) + 1e-4;
        let hits = self
            .tree
            .within(&[origin.x, origin.y], reach * reach, &squared_euclidean)
            .map_err(|e| SimError::Spatial(format!("{e:?}")))?;

        let mut orders: Vec<usize> = hits
            .into_iter()
            .map(|(_, &order)| order)
            .filter(|&order| edge.admits(origin.distance(self.entries[order].1), radius))
            .collect();
        orders.sort_unstable();

        Ok(orders.into_iter().map(|order| self.entries[order].0).collect())
    }
}
