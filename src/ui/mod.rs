// UI module - egui overlay drawn on top of the field

mod events;
mod stats;
mod ui;

// Re-export the public interface
pub use ui::{UIState, draw_ui, process_egui, wants_pointer};
