//! Zombie pursuit model.
//!
//! A zombie sleeps through its attack wait, then hunts: it pulls its target
//! point toward the nearest visible human (harder the closer the human is)
//! and turns its smoothed heading one fixed step toward that point per tick.

use rand::Rng;

use super::entity::{Behavior, Fate, Motion, TickContext};
use super::error::SimError;
use super::geometry::{
    Direction, Point, normalize_angle, random_angle, random_angle_change, step_angle_toward,
};
use super::perception::PerceptionCache;
use super::params::Params;
use super::spatial::{VisionEdge, bearing, closest_to};

/// Activity state derived from the attack wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieState {
    /// Still counting down; does not move.
    Dormant,
    /// Actively steering.
    Hunting,
}

/// Zombie-specific state.
#[derive(Debug, Clone)]
pub struct Zombie {
    /// Heading and speed.
    pub motion: Motion,
    /// Smoothed heading angle in radians.
    pub angle: f32,
    /// Ticks left before the zombie starts moving.
    pub attack_wait: u32,
    /// How far the zombie sees humans.
    pub vision: f32,
    /// Memo of the humans in vision.
    pub perception: PerceptionCache,
}

impl Zombie {
    /// Creates a dormant zombie with a random heading and wait in `[max/2, max]`.
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        let max_wait = params.zombie_attack_wait_max;
        let angle = random_angle_change(random_angle(rng), params.turn_step_degrees, rng);
        Self {
            motion: Motion::new(Direction::from_angle(angle), params.zombie_energy),
            angle,
            attack_wait: rng.random_range(max_wait / 2..=max_wait),
            vision: params.zombie_vision,
            perception: PerceptionCache::new(params.zombie_perception_period),
        }
    }

    /// Whether the zombie is still waiting to act.
    pub fn state(&self) -> ZombieState {
        if self.attack_wait > 0 {
            ZombieState::Dormant
        } else {
            ZombieState::Hunting
        }
    }

    /// Target point biased toward the nearest visible human, if any.
    ///
    /// The pull is `vision - distance` along the wrap-corrected bearing, so a
    /// human at the edge of vision exerts no pull at all.
    fn pursue(&mut self, here: Point, ctx: &TickContext<'_>) -> Result<Option<Point>, SimError> {
        let vision = self.vision;
        let visible = self
            .perception
            .try_query(|| ctx.index.within(here, vision, VisionEdge::Exclusive))?;

        let candidates = visible
            .iter()
            .filter_map(|&id| ctx.others.get(id).map(|human| (id, human.pos)));
        let nearest = closest_to(here, candidates, &ctx.bounds, |_| true);

        Ok(nearest.found.and_then(|id| ctx.others.get(id)).map(|victim| {
            let toward = bearing(here, victim.pos, &ctx.bounds);
            here.offset(toward.direction, vision - toward.distance)
        }))
    }
}

impl Behavior for Zombie {
    fn update<R: Rng + ?Sized>(
        &mut self,
        pos: &mut Point,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> Result<Fate, SimError> {
        if self.attack_wait > 0 {
            self.attack_wait -= 1;
            return Ok(Fate::Alive);
        }

        let here = *pos;
        let step = (ctx.params.turn_step_degrees as f32).to_radians();

        let aim = self
            .pursue(here, ctx)?
            .map(|goto| Direction::from_points(here, goto.offset(self.motion.heading, 1.0)))
            .filter(|aim| !aim.is_degenerate());

        self.angle = match aim {
            Some(aim) => step_angle_toward(self.angle, aim.to_angle(), step),
            // nothing to chase: wander
            None => normalize_angle(random_angle_change(self.angle, ctx.params.turn_step_degrees, rng)),
        };
        self.motion.heading = Direction::from_angle(self.angle);
        *pos = here.offset(self.motion.heading, self.motion.energy);

        Ok(Fate::Alive)
    }
}
