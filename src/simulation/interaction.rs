//! Manual pick-up and drag of entities.
//!
//! Held entities are moved out of their arenas for the duration of the drag,
//! which keeps them out of every spatial query and collision test. Each one
//! remembers which population it came from and goes back there on release.

use super::entity::Entity;
use super::error::SimError;
use super::geometry::Point;

/// The three populations of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopulationKind {
    /// Zombie arena.
    Zombies,
    /// Human arena.
    Humans,
    /// Food arena.
    Food,
}

#[derive(Debug, Clone)]
struct Held {
    origin: PopulationKind,
    entity: Entity,
    offset: Point,
}

/// Entities currently under the pointer.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    held: Vec<Held>,
}

impl Interaction {
    /// An interaction with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything is held.
    pub fn is_active(&self) -> bool {
        !self.held.is_empty()
    }

    /// Number of held entities.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Number of held entities that came from `kind`.
    pub fn count(&self, kind: PopulationKind) -> usize {
        self.held.iter().filter(|held| held.origin == kind).count()
    }

    /// Takes ownership of `entity`, keeping its offset from `pointer`.
    pub fn hold(&mut self, origin: PopulationKind, entity: Entity, pointer: Point) {
        let offset = entity.pos - pointer;
        self.held.push(Held {
            origin,
            entity,
            offset,
        });
    }

    /// Moves every held entity so it keeps its offset from `pointer`.
    pub fn drag_to(&mut self, pointer: Point) -> Result<(), SimError> {
        if self.held.is_empty() {
            return Err(SimError::NothingHeld);
        }
        for held in &mut self.held {
            held.entity.pos = pointer + held.offset;
        }
        Ok(())
    }

    /// Moves everything to `pointer` and hands it back with its origin.
    pub fn release(&mut self, pointer: Point) -> Result<Vec<(PopulationKind, Entity)>, SimError> {
        self.drag_to(pointer)?;
        Ok(self
            .held
            .drain(..)
            .map(|held| (held.origin, held.entity))
            .collect())
    }

    /// Held entities with their origin, for drawing.
    pub fn entities(&self) -> impl Iterator<Item = (PopulationKind, &Entity)> {
        self.held.iter().map(|held| (held.origin, &held.entity))
    }
}
