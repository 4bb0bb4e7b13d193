use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use std::collections::VecDeque;
use zombiesim::simulation::clock::format_elapsed;
use zombiesim::simulation::field::Field;

use super::ui::UIState;

const HUMAN_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 192, 203);
const ZOMBIE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 80, 80);
const FOOD_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

pub(super) fn draw_stats_panel(egui_ctx: &egui::Context, state: &mut UIState, field: &Field) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Simulation Stats");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("🔄 Restart").clicked() {
                    state.restart_requested = true;
                }
                let events_text = if state.show_events {
                    "📜 Events: ON"
                } else {
                    "📜 Events: OFF"
                };
                if ui.button(events_text).clicked() {
                    state.show_events = !state.show_events;
                }
            });

            ui.separator();

            let status = field.status();
            let params = field.params();
            let (zombie_ticks, human_ticks) = field.ticks();

            ui.label(format!("Time: {}", format_elapsed(field.elapsed())));
            ui.label(format!("Ticks: zombies {} / humans {}", zombie_ticks, human_ticks));
            ui.separator();

            ui.colored_label(HUMAN_COLOR, format!("Humans: {}", status.humans));
            ui.colored_label(ZOMBIE_COLOR, format!("Zombies: {}", status.zombies));
            ui.colored_label(FOOD_COLOR, format!("Food: {}/{}", status.food, params.max_food));
            if status.held > 0 {
                ui.label(format!("Held: {}", status.held));
            }

            ui.separator();
            ui.label("Population");
            draw_population_plot(
                ui,
                &state.human_count_history,
                &state.zombie_count_history,
                &state.food_count_history,
            );

            ui.separator();
            ui.collapsing("Parameters", |ui| {
                ui.label(format!("Zombie vision: {:.0}", params.zombie_vision));
                ui.label(format!("Human vision: {:.0}", params.human_vision));
                ui.label(format!("Zombie speed: {:.1}", params.zombie_energy));
                ui.label(format!("Human max energy: {:.1}", params.human_max_energy));
                ui.label(format!("Meals per food: {}", params.food_amount));
            });

            ui.separator();
            ui.label("Drag entities with the left mouse button.");
            ui.label("R restarts, F toggles fullscreen, Esc quits.");
        });
}

fn draw_population_plot(
    ui: &mut egui::Ui,
    human_data: &VecDeque<(f64, f64)>,
    zombie_data: &VecDeque<(f64, f64)>,
    food_data: &VecDeque<(f64, f64)>,
) {
    if human_data.is_empty() && zombie_data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("population_plot")
        .height(180.0)
        .show_axes([true, true])
        .legend(egui_plot::Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nTime: {:.1}s\nCount: {:.0}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            for (data, color, name) in [
                (human_data, HUMAN_COLOR, "Humans"),
                (zombie_data, ZOMBIE_COLOR, "Zombies"),
                (food_data, FOOD_COLOR, "Food"),
            ] {
                if data.is_empty() {
                    continue;
                }
                let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(points).color(color).name(name));
            }
        });
}
