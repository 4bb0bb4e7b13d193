//! The single entity record shared by every population.
//!
//! An [`Entity`] carries what all simulated objects have in common (position
//! and footprint) plus an [`EntityKind`] holding the variant-specific state.
//! Per-tick behavior is dispatched through the [`Behavior`] trait, which each actor
//! variant implements.

use rand::Rng;
use slotmap::{SlotMap, new_key_type};

use super::error::SimError;
use super::food::Food;
use super::geometry::{Bounds, Direction, Point};
use super::human::Human;
use super::params::Params;
use super::spatial::VisionIndex;
use super::zombie::Zombie;

new_key_type! {
    /// Stable handle for an entity inside one population arena.
    pub struct EntityId;
}

/// One population arena. Iteration order is stable between mutations.
pub type Population = SlotMap<EntityId, Entity>;

/// Movement state shared by zombies and humans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Current unit heading.
    pub heading: Direction,
    /// Distance moved per tick along `heading`.
    pub energy: f32,
}

impl Motion {
    /// Creates a motion state.
    pub fn new(heading: Direction, energy: f32) -> Self {
        Self { heading, energy }
    }
}

/// What happened to an entity during its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Still part of the simulation.
    Alive,
    /// Ran out of lifetime and must be removed. Starvation never converts.
    Starved,
}

/// Read-only view of the world handed to a behavior during an advance.
pub struct TickContext<'a> {
    /// Current playfield.
    pub bounds: Bounds,
    /// Simulation parameters.
    pub params: &'a Params,
    /// The population this actor reacts to (humans for zombies, zombies for humans).
    pub others: &'a Population,
    /// Vision index built over `others` for this advance.
    pub index: &'a VisionIndex,
    /// Food on the field.
    pub food: &'a Population,
}

/// Per-variant steering and state update.
pub trait Behavior {
    /// Advances this actor by one tick, possibly moving `pos`.
    fn update<R: Rng + ?Sized>(
        &mut self,
        pos: &mut Point,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> Result<Fate, SimError>;
}

/// Variant-specific state.
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// A pursuing zombie.
    Zombie(Zombie),
    /// A fleeing, foraging human.
    Human(Human),
    /// A food item.
    Food(Food),
}

/// Outline drawn for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Filled circle (actors).
    Circle,
    /// Filled square (food).
    Square,
}

/// Everything the renderer needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Outline.
    pub shape: Shape,
    /// Color as RGBA bytes, alpha already applied.
    pub rgba: [u8; 4],
}

const ZOMBIE_RGB: [u8; 3] = [255, 0, 0];
const HUMAN_RGB: [u8; 3] = [255, 192, 203];
const FOOD_RGB: [u8; 3] = [0, 255, 0];

/// A simulated object: position, footprint and variant state.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Center of the entity.
    pub pos: Point,
    /// Half the side of its square footprint, also its bite radius.
    pub radius: f32,
    /// Variant state.
    pub kind: EntityKind,
}

impl Entity {
    /// A freshly risen zombie at `pos`.
    pub fn zombie<R: Rng + ?Sized>(pos: Point, params: &Params, rng: &mut R) -> Self {
        Self {
            pos,
            radius: params.entity_radius,
            kind: EntityKind::Zombie(Zombie::new(params, rng)),
        }
    }

    /// A human with a fresh lifetime at `pos`.
    pub fn human<R: Rng + ?Sized>(pos: Point, params: &Params, rng: &mut R) -> Self {
        Self {
            pos,
            radius: params.entity_radius,
            kind: EntityKind::Human(Human::new(params, rng)),
        }
    }

    /// A full food item at `pos`.
    pub fn food(pos: Point, params: &Params) -> Self {
        Self {
            pos,
            radius: params.entity_radius,
            kind: EntityKind::Food(Food::new(params.food_amount)),
        }
    }

    /// Square footprint used for containment, feeding and pointer hits.
    pub fn footprint(&self) -> Bounds {
        Bounds::around(self.pos, self.radius)
    }

    /// Circle test used for bites.
    pub fn touches(&self, other: &Entity) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Box test used for feeding.
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.footprint().intersects(&other.footprint())
    }

    /// Advances the entity through its variant's [`Behavior`].
    pub fn update<R: Rng + ?Sized>(&mut self, ctx: &TickContext<'_>, rng: &mut R) -> Result<Fate, SimError> {
        match &mut self.kind {
            EntityKind::Zombie(zombie) => zombie.update(&mut self.pos, ctx, rng),
            EntityKind::Human(human) => human.update(&mut self.pos, ctx, rng),
            // food never moves or decays on its own
            EntityKind::Food(_) => Ok(Fate::Alive),
        }
    }

    /// Pushes an actor that left `bounds` back in through the opposite edge.
    ///
    /// Crossing the left edge puts the right side of the footprint on the
    /// right boundary, and so on for each axis. Returns whether it moved.
    pub fn contain_within(&mut self, bounds: &Bounds) -> bool {
        if bounds.contains_bounds(&self.footprint()) {
            return false;
        }
        let r = self.radius;
        if self.pos.x - r < bounds.left() {
            self.pos.x = bounds.right() - r;
        }
        if self.pos.x + r > bounds.right() {
            self.pos.x = bounds.left() + r;
        }
        if self.pos.y - r < bounds.top() {
            self.pos.y = bounds.bottom() - r;
        }
        if self.pos.y + r > bounds.bottom() {
            self.pos.y = bounds.top() + r;
        }
        true
    }

    /// Drawing hints for the renderer.
    pub fn appearance(&self) -> Appearance {
        let (shape, [r, g, b], alpha) = match &self.kind {
            EntityKind::Zombie(_) => (Shape::Circle, ZOMBIE_RGB, 1.0),
            EntityKind::Human(human) => (Shape::Circle, HUMAN_RGB, human.alpha()),
            EntityKind::Food(_) => (Shape::Square, FOOD_RGB, 1.0),
        };
        Appearance {
            shape,
            rgba: [r, g, b, (alpha * 255.0).round() as u8],
        }
    }

    /// Zombie state, if this is a zombie.
    pub fn as_zombie(&self) -> Option<&Zombie> {
        match &self.kind {
            EntityKind::Zombie(zombie) => Some(zombie),
            _ => None,
        }
    }

    /// Mutable zombie state, if this is a zombie.
    pub fn as_zombie_mut(&mut self) -> Option<&mut Zombie> {
        match &mut self.kind {
            EntityKind::Zombie(zombie) => Some(zombie),
            _ => None,
        }
    }

    /// Human state, if this is a human.
    pub fn as_human(&self) -> Option<&Human> {
        match &self.kind {
            EntityKind::Human(human) => Some(human),
            _ => None,
        }
    }

    /// Mutable human state, if this is a human.
    pub fn as_human_mut(&mut self) -> Option<&mut Human> {
        match &mut self.kind {
            EntityKind::Human(human) => Some(human),
            _ => None,
        }
    }

    /// Food state, if this is food.
    pub fn as_food(&self) -> Option<&Food> {
        match &self.kind {
            EntityKind::Food(food) => Some(food),
            _ => None,
        }
    }

    /// Mutable food state, if this is food.
    pub fn as_food_mut(&mut self) -> Option<&mut Food> {
        match &mut self.kind {
            EntityKind::Food(food) => Some(food),
            _ => None,
        }
    }
}
