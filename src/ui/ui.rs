use egui_macroquad::egui;
use std::collections::VecDeque;
use zombiesim::simulation::field::Field;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UIState {
    pub stats_panel_width: f32,
    pub human_count_history: VecDeque<(f64, f64)>,
    pub zombie_count_history: VecDeque<(f64, f64)>,
    pub food_count_history: VecDeque<(f64, f64)>,
    last_update_time: f32,
    update_interval: f32,
    pub restart_requested: bool,
    pub show_events: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 260.0,
            human_count_history: VecDeque::new(),
            zombie_count_history: VecDeque::new(),
            food_count_history: VecDeque::new(),
            last_update_time: 0.0,
            update_interval: 0.5, // Update every 0.5 seconds
            restart_requested: false,
            show_events: true,
        }
    }

    /// Forgets the plotted history, e.g. after the field was restarted.
    pub fn reset(&mut self) {
        self.human_count_history.clear();
        self.zombie_count_history.clear();
        self.food_count_history.clear();
        self.last_update_time = 0.0;
        self.restart_requested = false;
    }

    pub fn update_history(&mut self, field: &Field) {
        let time = field.elapsed().as_secs_f32();
        if time - self.last_update_time < self.update_interval {
            return;
        }
        self.last_update_time = time;

        let status = field.status();
        let t = time as f64;
        push_capped(&mut self.human_count_history, (t, status.humans as f64));
        push_capped(&mut self.zombie_count_history, (t, status.zombies as f64));
        push_capped(&mut self.food_count_history, (t, status.food as f64));
    }
}

fn push_capped(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

pub fn draw_ui(state: &mut UIState, field: &Field) {
    egui_macroquad::ui(|egui_ctx| {
        // Configure brighter text and UI
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        visuals.widgets.inactive.fg_stroke.color = egui::Color32::from_rgb(200, 200, 200);
        visuals.widgets.hovered.fg_stroke.color = egui::Color32::WHITE;
        visuals.widgets.active.fg_stroke.color = egui::Color32::WHITE;
        egui_ctx.set_visuals(visuals);

        // Right-side stats panel
        super::stats::draw_stats_panel(egui_ctx, state, field);

        if state.show_events {
            super::events::draw_events_panel(egui_ctx, field);
        }
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}

/// Whether egui wants the pointer, so clicks on panels do not grab entities.
pub fn wants_pointer() -> bool {
    let mut wants = false;
    egui_macroquad::cfg(|egui_ctx| {
        wants = egui_ctx.wants_pointer_input() || egui_ctx.is_pointer_over_area();
    });
    wants
}
