#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use zombiesim::simulation::entity::{Entity, EntityId};
use zombiesim::simulation::error::SimError;
use zombiesim::simulation::field::Field;
use zombiesim::simulation::geometry::{Bounds, Direction, Point, normalize_angle, step_angle_toward};
use zombiesim::simulation::human::Lifetime;
use zombiesim::simulation::interaction::PopulationKind;
use zombiesim::simulation::params::Params;
use zombiesim::simulation::spatial::{VisionIndex, bearing};
use zombiesim::simulation::zombie::ZombieState;

fn empty_field(width: f32, height: f32) -> Field {
    Field::empty(
        Params::default(),
        Bounds::from_size(width, height),
        StdRng::seed_from_u64(42),
    )
}

fn spawn_hunting_zombie(field: &mut Field, pos: Point) -> EntityId {
    let id = field.spawn(PopulationKind::Zombies, pos);
    let zombie = field
        .population_mut(PopulationKind::Zombies)
        .get_mut(id)
        .and_then(Entity::as_zombie_mut)
        .unwrap();
    zombie.attack_wait = 0;
    id
}

fn make_hungry(field: &mut Field, id: EntityId, energy: f32) {
    let human = field
        .population_mut(PopulationKind::Humans)
        .get_mut(id)
        .and_then(Entity::as_human_mut)
        .unwrap();
    human.lifetime = Lifetime::new(energy, 0.0005);
    human.motion.energy = energy;
}

#[test]
fn new_field_spawns_configured_populations() {
    let params = Params {
        initial_zombies: 3,
        initial_humans: 20,
        max_food: 4,
        ..Params::default()
    };
    let bounds = Bounds::from_size(400.0, 300.0);
    let field = Field::with_rng(params, bounds, StdRng::seed_from_u64(1));

    let status = field.status();
    assert_eq!((status.zombies, status.humans, status.food), (3, 20, 4));
    for (_, entity) in field.humans() {
        assert!(bounds.contains_point(entity.pos));
    }
}

#[test]
fn same_seed_gives_same_world() {
    let bounds = Bounds::from_size(400.0, 300.0);
    let a = Field::with_rng(Params::default(), bounds, StdRng::seed_from_u64(9));
    let b = Field::with_rng(Params::default(), bounds, StdRng::seed_from_u64(9));
    let positions = |field: &Field| field.humans().values().map(|h| h.pos).collect::<Vec<_>>();
    assert_eq!(positions(&a), positions(&b));
}

#[test]
fn coincident_zombie_bites_human() {
    let mut field = empty_field(100.0, 100.0);
    spawn_hunting_zombie(&mut field, Point::new(10.0, 10.0));
    field.spawn(PopulationKind::Humans, Point::new(10.0, 10.0));

    let converted = field.resolve_bites();

    assert_eq!(converted, 1);
    assert_eq!(field.humans().len(), 0);
    assert_eq!(field.zombies().len(), 2);
    let risen = field.zombies().values().filter(|z| z.pos == Point::new(10.0, 10.0)).count();
    assert_eq!(risen, 2);
}

#[test]
fn bite_keeps_total_actor_count() {
    let mut field = empty_field(200.0, 200.0);
    spawn_hunting_zombie(&mut field, Point::new(50.0, 50.0));
    field.spawn(PopulationKind::Humans, Point::new(55.0, 50.0));
    field.spawn(PopulationKind::Humans, Point::new(150.0, 150.0));

    let before = field.humans().len() + field.zombies().len();
    field.resolve_bites();

    assert_eq!(field.humans().len(), 1);
    assert_eq!(field.zombies().len(), 2);
    assert_eq!(field.humans().len() + field.zombies().len(), before);
}

#[test]
fn human_touched_by_two_zombies_converts_once() {
    let mut field = empty_field(200.0, 200.0);
    spawn_hunting_zombie(&mut field, Point::new(48.0, 50.0));
    spawn_hunting_zombie(&mut field, Point::new(52.0, 50.0));
    field.spawn(PopulationKind::Humans, Point::new(50.0, 50.0));

    assert_eq!(field.resolve_bites(), 1);
    assert_eq!(field.zombies().len(), 3);
}

#[test]
fn bites_are_circle_tests() {
    let mut field = empty_field(200.0, 200.0);
    spawn_hunting_zombie(&mut field, Point::new(50.0, 50.0));
    // Footprints overlap at the corner but centers are 11.3 apart (radii sum 10).
    field.spawn(PopulationKind::Humans, Point::new(58.0, 58.0));

    assert_eq!(field.resolve_bites(), 0);
    assert_eq!(field.humans().len(), 1);
}

#[test]
fn hungry_human_eats_last_meal_and_food_disappears() {
    let mut field = empty_field(200.0, 200.0);
    let food = field.spawn(PopulationKind::Food, Point::new(50.0, 50.0));
    field
        .population_mut(PopulationKind::Food)
        .get_mut(food)
        .and_then(Entity::as_food_mut)
        .unwrap()
        .amount = 1;
    let human = field.spawn(PopulationKind::Humans, Point::new(52.0, 50.0));
    make_hungry(&mut field, human, 0.5);

    let meals = field.resolve_feeding();

    assert_eq!(meals, 1);
    assert!(field.food().is_empty());
    let human = field.humans().get(human).and_then(Entity::as_human).unwrap();
    assert_eq!(human.lifetime.ticks(), 0);
    assert!(human.lifetime.peek() >= 2.0);
}

#[test]
fn sated_human_does_not_eat() {
    let mut field = empty_field(200.0, 200.0);
    field.spawn(PopulationKind::Food, Point::new(50.0, 50.0));
    let human = field.spawn(PopulationKind::Humans, Point::new(50.0, 50.0));
    make_hungry(&mut field, human, 3.0);

    assert_eq!(field.resolve_feeding(), 0);
    let food = field.food().values().next().and_then(Entity::as_food).unwrap();
    assert_eq!(food.amount, Params::default().food_amount);
}

#[test]
fn extinction_requires_no_held_humans() {
    let mut field = empty_field(100.0, 100.0);
    assert!(field.is_extinct());

    field.spawn(PopulationKind::Humans, Point::new(50.0, 50.0));
    assert!(!field.is_extinct());

    assert_eq!(field.pick_up(Point::new(50.0, 50.0)).unwrap(), 1);
    assert!(field.humans().is_empty());
    assert!(!field.is_extinct());
    assert!(!field.resolve().extinct);

    field.release(Point::new(60.0, 60.0)).unwrap();
    field.population_mut(PopulationKind::Humans).clear();
    assert!(field.resolve().extinct);
}

#[test]
fn extinction_is_logged_once() {
    let mut field = empty_field(100.0, 100.0);
    field.resolve();
    field.resolve();
    let extinctions = field
        .event_log()
        .events()
        .iter()
        .filter(|e| e.kind == zombiesim::simulation::event_log::EventKind::Extinction)
        .count();
    assert_eq!(extinctions, 1);
}

#[test]
fn actor_past_left_edge_reenters_on_the_right() {
    let mut field = empty_field(100.0, 100.0);
    let id = spawn_hunting_zombie(&mut field, Point::new(-20.0, 50.0));

    assert_eq!(field.contain_actors(), 1);

    let zombie = &field.zombies()[id];
    let footprint = zombie.footprint();
    assert_eq!(footprint.right(), 100.0);
    assert_eq!(zombie.pos.y, 50.0);
    assert!(field.bounds().contains_bounds(&footprint));
}

#[test]
fn actors_reenter_through_the_opposite_edge() {
    // (start, expected) for radius 5 on a 100x100 field
    let cases = [
        ((-20.0, 50.0), (95.0, 50.0)),
        ((120.0, 50.0), (5.0, 50.0)),
        ((50.0, -20.0), (50.0, 95.0)),
        ((50.0, 120.0), (50.0, 5.0)),
        ((-20.0, -20.0), (95.0, 95.0)),
        ((103.0, 103.0), (5.0, 5.0)),
        ((98.0, 2.0), (5.0, 95.0)),
    ];

    for ((x, y), (ex, ey)) in cases {
        let mut field = empty_field(100.0, 100.0);
        let id = field.spawn(PopulationKind::Humans, Point::new(x, y));

        assert_eq!(field.contain_actors(), 1, "start ({x}, {y})");

        let human = &field.humans()[id];
        assert_eq!(human.pos, Point::new(ex, ey), "start ({x}, {y})");
        assert!(field.bounds().contains_bounds(&human.footprint()));
    }
}

#[test]
fn actors_inside_are_left_alone() {
    let mut field = empty_field(100.0, 100.0);
    let id = field.spawn(PopulationKind::Humans, Point::new(5.0, 95.0));
    assert_eq!(field.contain_actors(), 0);
    assert_eq!(field.humans()[id].pos, Point::new(5.0, 95.0));
}

#[test]
fn held_entities_leave_every_query() {
    let mut field = empty_field(200.0, 200.0);
    spawn_hunting_zombie(&mut field, Point::new(50.0, 50.0));
    field.spawn(PopulationKind::Humans, Point::new(52.0, 50.0));

    // pointer over both: everything under it goes
    assert_eq!(field.pick_up(Point::new(51.0, 50.0)).unwrap(), 2);
    assert!(field.is_dragging());
    assert!(field.entities_at(Point::new(51.0, 50.0)).is_empty());
    assert!(VisionIndex::build(field.humans()).unwrap().is_empty());
    assert_eq!(field.resolve_bites(), 0);

    field.drag_to(Point::new(150.0, 150.0)).unwrap();
    assert_eq!(field.release(Point::new(151.0, 150.0)).unwrap(), 2);

    assert_eq!(field.humans().len(), 1);
    assert_eq!(field.zombies().len(), 1);
    let human = field.humans().values().next().unwrap();
    assert_eq!(human.pos, Point::new(152.0, 150.0));
}

#[test]
fn drag_protocol_errors() {
    let mut field = empty_field(100.0, 100.0);
    assert_eq!(field.release(Point::new(1.0, 1.0)), Err(SimError::NothingHeld));
    assert_eq!(field.drag_to(Point::new(1.0, 1.0)), Err(SimError::NothingHeld));

    field.spawn(PopulationKind::Food, Point::new(20.0, 20.0));
    field.pick_up(Point::new(20.0, 20.0)).unwrap();
    assert_eq!(
        field.pick_up(Point::new(20.0, 20.0)),
        Err(SimError::DragInProgress { held: 1 })
    );
}

#[test]
fn picking_up_empty_space_holds_nothing() {
    let mut field = empty_field(100.0, 100.0);
    assert_eq!(field.pick_up(Point::new(50.0, 50.0)).unwrap(), 0);
    assert!(!field.is_dragging());
}

#[test]
fn replenishment_counts_held_food() {
    let params = Params {
        max_food: 3,
        ..Params::default()
    };
    let mut field = Field::empty(params, Bounds::from_size(200.0, 200.0), StdRng::seed_from_u64(3));
    field.spawn(PopulationKind::Food, Point::new(20.0, 20.0));
    field.pick_up(Point::new(20.0, 20.0)).unwrap();

    assert_eq!(field.replenish_food(), 2);
    assert_eq!(field.food().len(), 2);
    assert_eq!(field.replenish_food(), 0);
}

#[test]
fn starving_human_is_removed_without_rising() {
    let mut field = empty_field(200.0, 200.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(100.0, 100.0));
    make_hungry(&mut field, human, 0.0);

    assert_eq!(field.advance_humans().unwrap(), 1);
    assert!(field.humans().is_empty());
    assert!(field.zombies().is_empty());
}

#[test]
fn dormant_zombie_stays_put() {
    let mut field = empty_field(200.0, 200.0);
    let id = field.spawn(PopulationKind::Zombies, Point::new(100.0, 100.0));
    let zombie = field
        .population_mut(PopulationKind::Zombies)
        .get_mut(id)
        .and_then(Entity::as_zombie_mut)
        .unwrap();
    zombie.attack_wait = 3;

    field.advance_zombies().unwrap();

    let entity = &field.zombies()[id];
    assert_eq!(entity.pos, Point::new(100.0, 100.0));
    let zombie = entity.as_zombie().unwrap();
    assert_eq!(zombie.attack_wait, 2);
    assert_eq!(zombie.state(), ZombieState::Dormant);
}

#[test]
fn new_zombie_waits_within_range() {
    let mut field = empty_field(200.0, 200.0);
    let max = Params::default().zombie_attack_wait_max;
    for _ in 0..50 {
        let id = field.spawn(PopulationKind::Zombies, Point::new(10.0, 10.0));
        let wait = field.zombies()[id].as_zombie().unwrap().attack_wait;
        assert!((max / 2..=max).contains(&wait));
    }
}

#[test]
fn hunting_zombie_moves_its_speed_each_tick() {
    let mut field = empty_field(400.0, 400.0);
    let id = spawn_hunting_zombie(&mut field, Point::new(200.0, 200.0));

    field.advance_zombies().unwrap();

    let moved = field.zombies()[id].pos.distance(Point::new(200.0, 200.0));
    assert!((moved - Params::default().zombie_energy).abs() < 1e-4);
}

#[test]
fn zombie_keeps_course_toward_human_ahead() {
    let mut field = empty_field(200.0, 200.0);
    let id = spawn_hunting_zombie(&mut field, Point::new(50.0, 50.0));
    let zombie = field
        .population_mut(PopulationKind::Zombies)
        .get_mut(id)
        .and_then(Entity::as_zombie_mut)
        .unwrap();
    zombie.angle = 0.0;
    zombie.motion.heading = Direction::from_angle(0.0);
    field.spawn(PopulationKind::Humans, Point::new(80.0, 50.0));

    field.advance_zombies().unwrap();

    let pos = field.zombies()[id].pos;
    assert!((pos.x - 52.0).abs() < 1e-4);
    assert!((pos.y - 50.0).abs() < 1e-4);
}

#[test]
fn human_flees_visible_zombie() {
    let mut field = empty_field(200.0, 200.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(50.0, 50.0));
    let zombie = field.spawn(PopulationKind::Zombies, Point::new(60.0, 50.0));

    field.advance_humans().unwrap();

    let entity = &field.humans()[human];
    let pos = entity.pos;
    assert!(pos.x < 50.0);
    assert!((pos.y - 50.0).abs() < 0.1);
    assert!(pos.distance(field.zombies()[zombie].pos) > 10.0);

    let energy = entity.as_human().unwrap().energy();
    assert!((pos.distance(Point::new(50.0, 50.0)) - energy).abs() < 1e-3);
}

#[test]
fn hungry_human_heads_for_distant_food() {
    let mut field = empty_field(400.0, 400.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(50.0, 50.0));
    make_hungry(&mut field, human, 1.0);
    let food = field.spawn(PopulationKind::Food, Point::new(250.0, 50.0));

    field.advance_humans().unwrap();

    let before = Point::new(50.0, 50.0).distance(field.food()[food].pos);
    let after = field.humans()[human].pos.distance(field.food()[food].pos);
    assert!(after < before);
}

#[test]
fn entities_at_lists_humans_then_zombies_then_food() {
    let mut field = empty_field(100.0, 100.0);
    let food = field.spawn(PopulationKind::Food, Point::new(50.0, 50.0));
    let zombie = field.spawn(PopulationKind::Zombies, Point::new(51.0, 50.0));
    let human = field.spawn(PopulationKind::Humans, Point::new(49.0, 50.0));

    assert_eq!(
        field.entities_at(Point::new(50.0, 50.0)),
        vec![
            (PopulationKind::Humans, human),
            (PopulationKind::Zombies, zombie),
            (PopulationKind::Food, food),
        ]
    );
}

#[test]
fn resolve_reports_every_pass() {
    let params = Params {
        max_food: 2,
        ..Params::default()
    };
    let mut field = Field::empty(params, Bounds::from_size(200.0, 200.0), StdRng::seed_from_u64(5));
    spawn_hunting_zombie(&mut field, Point::new(100.0, 100.0));
    field.spawn(PopulationKind::Humans, Point::new(100.0, 100.0));
    field.spawn(PopulationKind::Humans, Point::new(-30.0, 20.0));

    let resolution = field.resolve();

    assert_eq!(resolution.converted, 1);
    assert_eq!(resolution.contained, 1);
    assert_eq!(resolution.food_spawned, 2);
    assert!(!resolution.extinct);
}

fn aim_zombie(field: &mut Field, id: EntityId, angle: f32) {
    let zombie = field
        .population_mut(PopulationKind::Zombies)
        .get_mut(id)
        .and_then(Entity::as_zombie_mut)
        .unwrap();
    zombie.angle = angle;
    zombie.motion.heading = Direction::from_angle(angle);
}

fn zombie_angle(field: &Field, id: EntityId) -> f32 {
    field.zombies()[id].as_zombie().unwrap().angle
}

#[test]
fn zombie_turns_across_the_seam_toward_a_far_human() {
    // span ≈ 141.4, so the raw distance of ≈ 80.2 folds to ≈ 61.3 and the pull inverts
    let mut field = empty_field(100.0, 100.0);
    let id = spawn_hunting_zombie(&mut field, Point::new(10.0, 50.0));
    aim_zombie(&mut field, id, 0.0);
    field.spawn(PopulationKind::Humans, Point::new(90.0, 55.0));

    field.advance_zombies().unwrap();

    // the target lies west through the seam at about -176°, so the short turn is clockwise
    let step = 10f32.to_radians();
    assert!((zombie_angle(&field, id) + step).abs() < 1e-4);
    assert!(field.zombies()[id].pos.y < 50.0);

    for _ in 0..5 {
        field.advance_zombies().unwrap();
    }
    assert!((zombie_angle(&field, id) + 6.0 * step).abs() < 1e-3);
}

#[test]
fn human_flees_through_the_seam() {
    // span ≈ 84.9: the zombie at raw distance 45 is folded to ≈ 39.9 and lies behind the human
    let mut field = empty_field(60.0, 60.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(5.0, 30.0));
    field.spawn(PopulationKind::Zombies, Point::new(50.0, 30.0));

    field.advance_humans().unwrap();

    let pos = field.humans()[human].pos;
    assert!(pos.x > 5.0);
    assert!((pos.y - 30.0).abs() < 0.1);
}

#[test]
fn hungry_human_forages_through_the_seam() {
    let mut field = empty_field(60.0, 60.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(5.0, 30.0));
    make_hungry(&mut field, human, 1.0);
    field.spawn(PopulationKind::Food, Point::new(50.0, 30.0));

    field.advance_humans().unwrap();

    let pos = field.humans()[human].pos;
    assert!(pos.x < 5.0);
    assert!((pos.y - 30.0).abs() < 0.1);
}

#[test]
fn zombie_only_notices_new_humans_at_its_refresh_period() {
    let mut field = empty_field(400.0, 400.0);
    let id = spawn_hunting_zombie(&mut field, Point::new(200.0, 200.0));
    let period = field.params().zombie_perception_period;
    assert_eq!(period, 10);

    // first tick looks around an empty field
    field.advance_zombies().unwrap();
    let here = field.zombies()[id].pos;
    let heading = zombie_angle(&field, id) + std::f32::consts::FRAC_PI_2;
    let human_pos = here.offset(Direction::from_angle(heading), 30.0);
    field.spawn(PopulationKind::Humans, human_pos);

    // ticks 2..=10 reuse the stale empty answer
    for _ in 1..period {
        field.advance_zombies().unwrap();
        assert!(field.zombies()[id].as_zombie().unwrap().perception.last().is_empty());
    }

    let before = field.zombies()[id].pos;
    let angle_before = zombie_angle(&field, id);
    let target = bearing(before, human_pos, &field.bounds()).direction.to_angle();
    let expected = step_angle_toward(angle_before, target, 10f32.to_radians());

    // tick 11 refreshes and steers toward the human
    field.advance_zombies().unwrap();

    let zombie = field.zombies()[id].as_zombie().unwrap();
    assert_eq!(zombie.perception.calls(), u64::from(period) + 1);
    assert_eq!(zombie.perception.last().len(), 1);
    assert!(normalize_angle(zombie.angle - expected).abs() < 1e-4);
}

#[test]
fn human_only_notices_new_zombies_at_its_refresh_period() {
    let mut field = empty_field(400.0, 400.0);
    let human = field.spawn(PopulationKind::Humans, Point::new(200.0, 200.0));
    let period = field.params().human_perception_period;
    assert_eq!(period, 5);

    field.advance_humans().unwrap();
    let here = field.humans()[human].pos;
    field.spawn(PopulationKind::Zombies, Point::new(here.x + 20.0, here.y));

    for _ in 1..period {
        field.advance_humans().unwrap();
        assert!(field.humans()[human].as_human().unwrap().perception.last().is_empty());
    }

    field.advance_humans().unwrap();
    let state = field.humans()[human].as_human().unwrap();
    assert_eq!(state.perception.calls(), u64::from(period) + 1);
    assert_eq!(state.perception.last().len(), 1);
}
