//! # Zombiesim - Humans versus Zombies
//!
//! A real-time steering simulation on a bounded playfield. Zombies hunt the
//! nearest human they can see; humans flee every zombie in sight and forage
//! for food as their lifetime runs down. A bitten human rises as a zombie.
//!
//! ## Features
//!
//! - Per-variant steering behind a single [`simulation::entity::Behavior`] trait
//! - k-d tree vision queries with a wrap-around distance heuristic
//! - Memoized perception refreshed every few ticks
//! - Linear lifetime decay, feeding and food replenishment
//! - Pick up and drag entities with the mouse
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::field`] - World state and the per-frame lifecycle
//! - [`simulation::zombie`] - Pursuit model
//! - [`simulation::human`] - Flee/forage model and lifetime decay
//! - [`simulation::spatial`] - Nearest-neighbor and vision queries
//! - [`simulation::params`] - Simulation parameters

/// Core simulation logic and data structures.
pub mod simulation {
    /// Tick cadences and elapsed-time formatting.
    pub mod clock;
    /// The entity record, its variants and the behavior trait.
    pub mod entity;
    /// Error types.
    pub mod error;
    /// Recent events shown in the UI.
    pub mod event_log;
    /// World state and lifecycle passes.
    pub mod field;
    /// Food items.
    pub mod food;
    /// Points, directions, angles and rectangles.
    pub mod geometry;
    /// Human steering and lifetime.
    pub mod human;
    /// Pointer pick-up and drag.
    pub mod interaction;
    /// Simulation parameters.
    pub mod params;
    /// Memoized vision queries.
    pub mod perception;
    /// Spatial queries over populations.
    pub mod spatial;
    /// Zombie steering.
    pub mod zombie;
}
