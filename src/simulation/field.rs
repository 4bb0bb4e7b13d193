//! The world: three population arenas on a bounded playfield.
//!
//! The field advances zombies and humans separately (they run at different
//! cadences) and resolves collisions, edge containment, food replenishment and
//! extinction once per frame in [`Field::resolve`]. Every pass collects its
//! results before mutating an arena, so removals never skip entities.

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::clock::format_elapsed;
use super::entity::{Entity, EntityId, Fate, Population, TickContext};
use super::error::SimError;
use super::event_log::{EventKind, EventLog};
use super::geometry::{Bounds, Point};
use super::interaction::{Interaction, PopulationKind};
use super::params::Params;
use super::spatial::VisionIndex;

/// Outcome of one [`Field::resolve`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Humans bitten and turned into zombies.
    pub converted: usize,
    /// Meals eaten.
    pub meals: usize,
    /// Actors pushed back inside the bounds.
    pub contained: usize,
    /// Food items spawned to refill the target.
    pub food_spawned: usize,
    /// No human is left, simulated or held.
    pub extinct: bool,
}

/// Population snapshot for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Simulated humans.
    pub humans: usize,
    /// Simulated zombies.
    pub zombies: usize,
    /// Food items on the field.
    pub food: usize,
    /// Entities under the pointer.
    pub held: usize,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "humans: {} zombies: {}", self.humans, self.zombies)
    }
}

/// The simulation world.
pub struct Field {
    zombies: Population,
    humans: Population,
    food: Population,
    bounds: Bounds,
    params: Params,
    rng: StdRng,
    interaction: Interaction,
    event_log: EventLog,
    zombie_ticks: u64,
    human_ticks: u64,
    started: Instant,
    extinction_reported: bool,
}

impl Field {
    /// Creates a populated field seeded from OS entropy.
    pub fn new(params: Params, bounds: Bounds) -> Self {
        Self::with_rng(params, bounds, StdRng::from_os_rng())
    }

    /// Creates a populated field using `rng` for every random decision.
    ///
    /// Spawns the configured zombies, humans and food at random points in `bounds`.
    pub fn with_rng(params: Params, bounds: Bounds, rng: StdRng) -> Self {
        let mut field = Self::empty(params, bounds, rng);
        for _ in 0..field.params.initial_zombies {
            field.spawn_random(PopulationKind::Zombies);
        }
        for _ in 0..field.params.initial_humans {
            field.spawn_random(PopulationKind::Humans);
        }
        for _ in 0..field.params.max_food {
            field.spawn_random(PopulationKind::Food);
        }
        info!(
            "field created: {} zombies, {} humans, {} food on {}x{}",
            field.zombies.len(),
            field.humans.len(),
            field.food.len(),
            bounds.width(),
            bounds.height()
        );
        field
    }

    /// Creates a field with no entities.
    pub fn empty(params: Params, bounds: Bounds, rng: StdRng) -> Self {
        let event_log = EventLog::new(params.event_log_size);
        Self {
            zombies: Population::with_key(),
            humans: Population::with_key(),
            food: Population::with_key(),
            bounds,
            params,
            rng,
            interaction: Interaction::new(),
            event_log,
            zombie_ticks: 0,
            human_ticks: 0,
            started: Instant::now(),
            extinction_reported: false,
        }
    }

    /// Adds a new entity of `kind` at `pos`.
    pub fn spawn(&mut self, kind: PopulationKind, pos: Point) -> EntityId {
        let entity = match kind {
            PopulationKind::Zombies => Entity::zombie(pos, &self.params, &mut self.rng),
            PopulationKind::Humans => Entity::human(pos, &self.params, &mut self.rng),
            PopulationKind::Food => Entity::food(pos, &self.params),
        };
        self.population_mut(kind).insert(entity)
    }

    fn spawn_random(&mut self, kind: PopulationKind) -> EntityId {
        let pos = self.bounds.random_point(&mut self.rng);
        self.spawn(kind, pos)
    }

    /// One population arena.
    pub fn population(&self, kind: PopulationKind) -> &Population {
        match kind {
            PopulationKind::Zombies => &self.zombies,
            PopulationKind::Humans => &self.humans,
            PopulationKind::Food => &self.food,
        }
    }

    /// Mutable access to one population arena.
    pub fn population_mut(&mut self, kind: PopulationKind) -> &mut Population {
        match kind {
            PopulationKind::Zombies => &mut self.zombies,
            PopulationKind::Humans => &mut self.humans,
            PopulationKind::Food => &mut self.food,
        }
    }

    /// Zombie arena.
    pub fn zombies(&self) -> &Population {
        &self.zombies
    }

    /// Human arena.
    pub fn humans(&self) -> &Population {
        &self.humans
    }

    /// Food arena.
    pub fn food(&self) -> &Population {
        &self.food
    }

    /// Current playfield.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Recent notable events.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Number of zombie and human advances so far.
    pub fn ticks(&self) -> (u64, u64) {
        (self.zombie_ticks, self.human_ticks)
    }

    /// Wall-clock time since the field was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Population counts.
    pub fn status(&self) -> Status {
        Status {
            humans: self.humans.len(),
            zombies: self.zombies.len(),
            food: self.food.len(),
            held: self.interaction.len(),
        }
    }

    /// Adopts a new playfield, e.g. after the window was resized.
    pub fn resize(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            debug!("field resized to {}x{}", bounds.width(), bounds.height());
            self.bounds = bounds;
        }
    }

    /// Advances every zombie by one tick.
    pub fn advance_zombies(&mut self) -> Result<(), SimError> {
        let index = VisionIndex::build(&self.humans)?;
        let ctx = TickContext {
            bounds: self.bounds,
            params: &self.params,
            others: &self.humans,
            index: &index,
            food: &self.food,
        };
        for zombie in self.zombies.values_mut() {
            zombie.update(&ctx, &mut self.rng)?;
        }
        self.zombie_ticks += 1;
        Ok(())
    }

    /// Advances every human by one tick, removing those whose lifetime ran out.
    ///
    /// Returns the number of humans that starved. Starvation does not create zombies.
    pub fn advance_humans(&mut self) -> Result<usize, SimError> {
        let index = VisionIndex::build(&self.zombies)?;
        let ctx = TickContext {
            bounds: self.bounds,
            params: &self.params,
            others: &self.zombies,
            index: &index,
            food: &self.food,
        };
        let mut starved = Vec::new();
        for (id, human) in &mut self.humans {
            if human.update(&ctx, &mut self.rng)? == Fate::Starved {
                starved.push(id);
            }
        }
        self.human_ticks += 1;

        let time = self.started.elapsed().as_secs_f32();
        for id in &starved {
            if let Some(human) = self.humans.remove(*id) {
                debug!("human starved at ({:.0}, {:.0})", human.pos.x, human.pos.y);
                self.event_log.log(time, "A human starved".to_string(), EventKind::Starvation);
            }
        }
        Ok(starved.len())
    }

    /// Runs the per-frame lifecycle: bites, feeding, edge containment,
    /// food replenishment and the extinction check.
    pub fn resolve(&mut self) -> Resolution {
        let converted = self.resolve_bites();
        let meals = self.resolve_feeding();
        let contained = self.contain_actors();
        let food_spawned = self.replenish_food();
        let extinct = self.is_extinct();

        if extinct && !self.extinction_reported {
            self.extinction_reported = true;
            let elapsed = format_elapsed(self.elapsed());
            info!("all humans dead after {}", elapsed);
            self.event_log.log(
                self.started.elapsed().as_secs_f32(),
                format!("Humanity fell after {elapsed}"),
                EventKind::Extinction,
            );
        }

        Resolution {
            converted,
            meals,
            contained,
            food_spawned,
            extinct,
        }
    }

    /// Turns every human touched by a zombie into a zombie at the same spot.
    ///
    /// A human touched by several zombies converts once.
    pub fn resolve_bites(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut bitten = Vec::new();
        for zombie in self.zombies.values() {
            for (id, human) in &self.humans {
                if zombie.touches(human) && seen.insert(id) {
                    bitten.push(id);
                }
            }
        }

        let time = self.started.elapsed().as_secs_f32();
        let mut converted = 0;
        for id in bitten {
            let Some(human) = self.humans.remove(id) else {
                continue;
            };
            let zombie = Entity::zombie(human.pos, &self.params, &mut self.rng);
            self.zombies.insert(zombie);
            converted += 1;
            debug!("human bitten at ({:.0}, {:.0})", human.pos.x, human.pos.y);
            self.event_log.log(time, "A human was bitten".to_string(), EventKind::Bite);
        }
        converted
    }

    /// Lets hungry humans overlapping a food item eat from it.
    ///
    /// Emptied food items are removed. Returns the number of meals eaten.
    pub fn resolve_feeding(&mut self) -> usize {
        let time = self.started.elapsed().as_secs_f32();
        let food_ids: Vec<EntityId> = self.food.keys().collect();
        let mut meals = 0;

        for food_id in food_ids {
            let Some(food_entity) = self.food.get(food_id) else {
                continue;
            };
            let eaters: Vec<EntityId> = self
                .humans
                .iter()
                .filter(|(_, human)| food_entity.overlaps(human))
                .map(|(id, _)| id)
                .collect();

            for human_id in eaters {
                let (Some(food_entity), Some(human_entity)) =
                    (self.food.get_mut(food_id), self.humans.get_mut(human_id))
                else {
                    continue;
                };
                let (Some(food), Some(human)) = (food_entity.as_food_mut(), human_entity.as_human_mut())
                else {
                    continue;
                };
                if human.eat(food, &self.params, &mut self.rng) {
                    meals += 1;
                    self.event_log.log(time, "A human ate".to_string(), EventKind::Meal);
                }
            }

            let emptied = self
                .food
                .get(food_id)
                .and_then(Entity::as_food)
                .is_some_and(|food| !food.has_more());
            if emptied {
                self.food.remove(food_id);
                debug!("food item eaten up");
            }
        }
        meals
    }

    /// Pushes every actor that left the bounds back in. Returns how many moved.
    pub fn contain_actors(&mut self) -> usize {
        let bounds = self.bounds;
        self.zombies
            .values_mut()
            .chain(self.humans.values_mut())
            .map(|actor| actor.contain_within(&bounds))
            .filter(|&moved| moved)
            .count()
    }

    /// Spawns food until live plus held food reaches the target.
    pub fn replenish_food(&mut self) -> usize {
        let held = self.interaction.count(PopulationKind::Food);
        let mut spawned = 0;
        while self.food.len() + held < self.params.max_food {
            self.spawn_random(PopulationKind::Food);
            spawned += 1;
        }
        spawned
    }

    /// True when no human is simulated and none is held under the pointer.
    pub fn is_extinct(&self) -> bool {
        self.humans.is_empty() && self.interaction.count(PopulationKind::Humans) == 0
    }

    /// Every entity whose footprint contains `point`: humans, then zombies, then food.
    pub fn entities_at(&self, point: Point) -> Vec<(PopulationKind, EntityId)> {
        [PopulationKind::Humans, PopulationKind::Zombies, PopulationKind::Food]
            .into_iter()
            .flat_map(|kind| {
                self.population(kind)
                    .iter()
                    .filter(move |(_, entity)| entity.footprint().contains_point(point))
                    .map(move |(id, _)| (kind, id))
            })
            .collect()
    }

    /// Lifts everything under `point` out of the simulation.
    ///
    /// Returns the number of entities picked up (possibly zero).
    pub fn pick_up(&mut self, point: Point) -> Result<usize, SimError> {
        if self.interaction.is_active() {
            return Err(SimError::DragInProgress {
                held: self.interaction.len(),
            });
        }
        let targets = self.entities_at(point);
        for &(kind, id) in &targets {
            if let Some(entity) = self.population_mut(kind).remove(id) {
                self.interaction.hold(kind, entity, point);
            }
        }
        if !targets.is_empty() {
            debug!("picked up {} entities", targets.len());
        }
        Ok(targets.len())
    }

    /// Moves held entities along with the pointer.
    pub fn drag_to(&mut self, point: Point) -> Result<(), SimError> {
        self.interaction.drag_to(point)
    }

    /// Drops held entities at `point` and returns them to their populations.
    pub fn release(&mut self, point: Point) -> Result<usize, SimError> {
        let released = self.interaction.release(point)?;
        let count = released.len();
        for (kind, entity) in released {
            self.population_mut(kind).insert(entity);
        }
        debug!("released {} entities", count);
        Ok(count)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.interaction.is_active()
    }

    /// Entities under the pointer, for drawing.
    pub fn held(&self) -> impl Iterator<Item = (PopulationKind, &Entity)> {
        self.interaction.entities()
    }
}
