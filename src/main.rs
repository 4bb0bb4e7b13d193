use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use zombiesim::simulation::clock::{Cadence, format_elapsed};
use zombiesim::simulation::field::Field;
use zombiesim::simulation::geometry::{Bounds, Point};
use zombiesim::simulation::params::Params;

mod graphics;
mod ui;

/// Humans versus zombies steering simulation
#[derive(Parser, Debug)]
#[command(name = "zombiesim")]
#[command(about = "Watch zombies hunt humans who flee and forage to stay alive")]
struct Args {
    /// JSON parameter file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Starting zombies at the reference width
    #[arg(long)]
    zombies: Option<usize>,

    /// Starting humans at the reference width
    #[arg(long)]
    humans: Option<usize>,

    /// Food items kept on the field at the reference width
    #[arg(long)]
    food: Option<usize>,
}

impl Args {
    fn params(&self) -> Params {
        let mut params = match &self.config {
            Some(path) => Params::load(path).unwrap_or_else(|err| {
                log::error!("{}; falling back to default parameters", err);
                Params::default()
            }),
            None => Params::default(),
        };
        if let Some(zombies) = self.zombies {
            params.initial_zombies = zombies;
        }
        if let Some(humans) = self.humans {
            params.initial_humans = humans;
        }
        if let Some(food) = self.food {
            params.max_food = food;
        }
        params
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Zombie Simulation".to_owned(),
        window_width: 1440,
        window_height: 900,
        window_resizable: true,
        ..Default::default()
    }
}

fn screen_bounds() -> Bounds {
    Bounds::from_size(screen_width(), screen_height())
}

/// Owns the running field and everything that restarts with it.
struct Session {
    field: Field,
    zombie_cadence: Cadence,
    human_cadence: Cadence,
    status_cadence: Cadence,
}

impl Session {
    fn start(params: &Params, seed: Option<u64>, restarts: u64) -> Self {
        let bounds = screen_bounds();
        let scaled = params.scaled_for_width(bounds.width());
        let field = match seed {
            Some(seed) => Field::with_rng(scaled, bounds, StdRng::seed_from_u64(seed.wrapping_add(restarts))),
            None => Field::new(scaled, bounds),
        };
        Self {
            zombie_cadence: Cadence::from_millis(params.zombie_update_ms),
            human_cadence: Cadence::from_millis(params.human_update_ms),
            status_cadence: Cadence::from_millis(params.status_interval_secs.saturating_mul(1_000)),
            field,
        }
    }

    fn step(&mut self, frame: Duration) {
        self.field.resize(screen_bounds());

        for _ in 0..self.zombie_cadence.poll(frame) {
            if let Err(err) = self.field.advance_zombies() {
                log::error!("zombie update failed: {}", err);
            }
        }
        for _ in 0..self.human_cadence.poll(frame) {
            if let Err(err) = self.field.advance_humans() {
                log::error!("human update failed: {}", err);
            }
        }
        if self.status_cadence.poll(frame) > 0 {
            log::info!("{}", self.field.status());
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    let params = args.params();
    log::info!("Zombie simulation starting...");

    let mut restarts = 0;
    let mut session = Session::start(&params, args.seed, restarts);
    let mut ui_state = ui::UIState::new();
    let mut fullscreen = false;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::F) {
            fullscreen = !fullscreen;
            set_fullscreen(fullscreen);
        }

        let frame = Duration::from_secs_f32(get_frame_time().max(0.0));
        session.step(frame);
        let resolution = session.field.resolve();

        handle_pointer(&mut session.field);

        if resolution.extinct || is_key_pressed(KeyCode::R) || ui_state.restart_requested {
            if !resolution.extinct {
                log::info!(
                    "restarting; humans survived {}",
                    format_elapsed(session.field.elapsed())
                );
            }
            restarts += 1;
            session = Session::start(&params, args.seed, restarts);
            ui_state.reset();
        }

        graphics::draw_field(&session.field);
        graphics::draw_held(&session.field);

        ui_state.update_history(&session.field);
        ui::draw_ui(&mut ui_state, &session.field);
        ui::process_egui();

        next_frame().await
    }

    log::info!("{}", session.field.status());
}

fn handle_pointer(field: &mut Field) {
    let (x, y) = mouse_position();
    let pointer = Point::new(x, y);

    if is_mouse_button_pressed(MouseButton::Left) && !ui::wants_pointer() {
        if let Err(err) = field.pick_up(pointer) {
            log::error!("pick up failed: {}", err);
        }
    } else if is_mouse_button_released(MouseButton::Left) {
        if field.is_dragging() {
            if let Err(err) = field.release(pointer) {
                log::error!("release failed: {}", err);
            }
        }
    } else if is_mouse_button_down(MouseButton::Left) && field.is_dragging() {
        if let Err(err) = field.drag_to(pointer) {
            log::error!("drag failed: {}", err);
        }
    }
}
