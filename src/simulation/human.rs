//! Human flee/forage model and the lifetime decay schedule.

use rand::Rng;

use super::entity::{Behavior, Fate, Motion, TickContext};
use super::error::SimError;
use super::food::Food;
use super::geometry::{Direction, Point, random_angle};
use super::params::Params;
use super::perception::PerceptionCache;
use super::spatial::{VisionEdge, bearing, closest_to};

/// Linearly decaying energy budget of one life.
///
/// `energy(t) = max(initial - decay * t, 0)` where `t` counts human ticks
/// since the lifetime began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    initial: f32,
    decay: f32,
    ticks: u64,
}

impl Lifetime {
    /// A lifetime starting at `initial` and losing `decay` per tick.
    pub fn new(initial: f32, decay: f32) -> Self {
        Self {
            initial,
            decay,
            ticks: 0,
        }
    }

    /// A lifetime with a randomized start in `[base, base + spread)`.
    pub fn fresh<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let initial = params.lifetime_base + rng.random::<f32>() * params.lifetime_spread;
        Self::new(initial, params.lifetime_decay)
    }

    /// Energy at tick `t` of this lifetime.
    pub fn energy_at(&self, t: u64) -> f32 {
        (self.initial - self.decay * t as f32).max(0.0)
    }

    /// Energy the next call to [`Lifetime::advance`] will return.
    pub fn peek(&self) -> f32 {
        self.energy_at(self.ticks)
    }

    /// Returns the current energy and moves one tick along the schedule.
    pub fn advance(&mut self) -> f32 {
        let energy = self.peek();
        self.ticks += 1;
        energy
    }

    /// Starting energy.
    pub fn initial(&self) -> f32 {
        self.initial
    }

    /// Ticks elapsed in this lifetime.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Human-specific state.
#[derive(Debug, Clone)]
pub struct Human {
    /// Heading, and the current energy which doubles as speed.
    pub motion: Motion,
    /// Remaining life.
    pub lifetime: Lifetime,
    /// How far the human sees zombies.
    pub vision: f32,
    /// Memo of the zombies in vision.
    pub perception: PerceptionCache,
    hungry_level: f32,
    alpha: f32,
}

impl Human {
    /// A human with a fresh lifetime and random heading.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let lifetime = Lifetime::fresh(params, rng);
        let energy = lifetime.peek();
        Self {
            motion: Motion::new(Direction::from_angle(random_angle(rng)), energy),
            lifetime,
            vision: params.human_vision,
            perception: PerceptionCache::new(params.human_perception_period),
            hungry_level: params.hungry_level(),
            alpha: alpha_for(energy),
        }
    }

    /// Current energy (also the distance moved per tick).
    pub fn energy(&self) -> f32 {
        self.motion.energy
    }

    /// Hungry humans seek food and are the only ones that can eat.
    pub fn is_hungry(&self) -> bool {
        self.motion.energy < self.hungry_level
    }

    /// Opacity for drawing, `min(energy / 2, 1)`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Eats one unit of `food` if hungry, starting a fresh lifetime.
    ///
    /// Returns whether anything was eaten.
    pub fn eat<R: Rng + ?Sized>(&mut self, food: &mut Food, params: &Params, rng: &mut R) -> bool {
        if !self.is_hungry() || !food.has_more() {
            return false;
        }
        food.consume();
        self.lifetime = Lifetime::fresh(params, rng);
        self.motion.heading = Direction::from_angle(random_angle(rng));
        true
    }

    /// Target point pushed away from every visible zombie.
    ///
    /// Each zombie pushes with `(vision - distance)²`, so close threats dominate.
    fn flee(&mut self, here: Point, goto: Point, ctx: &TickContext<'_>) -> Result<Point, SimError> {
        let vision = self.vision;
        let visible = self
            .perception
            .try_query(|| ctx.index.within(here, vision, VisionEdge::Inclusive))?;

        Ok(visible
            .iter()
            .filter_map(|&id| ctx.others.get(id))
            .fold(goto, |goto, zombie| {
                let toward = bearing(here, zombie.pos, &ctx.bounds);
                let weight = (vision - toward.distance).powi(2);
                goto.offset(-toward.direction, weight)
            }))
    }

    /// Target point pulled toward the nearest food when hungry.
    fn forage(&self, here: Point, goto: Point, ctx: &TickContext<'_>) -> Point {
        if !self.is_hungry() {
            return goto;
        }
        let candidates = ctx.food.iter().map(|(id, food)| (id, food.pos));
        let nearest = closest_to(here, candidates, &ctx.bounds, |_| true);
        match nearest.found.and_then(|id| ctx.food.get(id)) {
            Some(food) => {
                let toward = bearing(here, food.pos, &ctx.bounds);
                let weight = (self.motion.energy / ctx.params.human_max_energy * self.vision).powi(2);
                goto.offset(toward.direction, weight)
            }
            None => goto,
        }
    }
}

fn alpha_for(energy: f32) -> f32 {
    (energy / 2.0).min(1.0)
}

impl Behavior for Human {
    fn update<R: Rng + ?Sized>(
        &mut self,
        pos: &mut Point,
        ctx: &TickContext<'_>,
        _rng: &mut R,
    ) -> Result<Fate, SimError> {
        let energy = self.lifetime.advance();
        self.motion.energy = energy;
        if energy <= 0.0 {
            return Ok(Fate::Starved);
        }
        self.alpha = alpha_for(energy);

        let here = *pos;
        let goto = self.flee(here, here, ctx)?;
        let goto = self.forage(here, goto, ctx);

        let heading = Direction::from_points(here, goto.offset(self.motion.heading, 1.0));
        if !heading.is_degenerate() {
            self.motion.heading = heading;
        }
        *pos = here.offset(self.motion.heading, energy);

        Ok(Fate::Alive)
    }
}
