use macroquad::prelude::*;
use zombiesim::simulation::entity::{Entity, Shape};
use zombiesim::simulation::field::Field;

const BACKGROUND: Color = Color::new(0.06, 0.06, 0.08, 1.0);
const HELD_OUTLINE: Color = Color::new(1.0, 1.0, 1.0, 0.8);

fn draw_entity(entity: &Entity) {
    let look = entity.appearance();
    let [r, g, b, a] = look.rgba;
    let color = Color::from_rgba(r, g, b, a);
    match look.shape {
        Shape::Circle => draw_circle(entity.pos.x, entity.pos.y, entity.radius, color),
        Shape::Square => {
            let side = entity.radius * 2.0;
            draw_rectangle(
                entity.pos.x - entity.radius,
                entity.pos.y - entity.radius,
                side,
                side,
                color,
            );
        }
    }
}

/// Clears the frame and draws food, then humans, then zombies on top.
pub fn draw_field(field: &Field) {
    clear_background(BACKGROUND);

    field.food().values().for_each(draw_entity);
    field.humans().values().for_each(draw_entity);
    field.zombies().values().for_each(draw_entity);
}

/// Draws entities under the pointer with an outline so they stand out.
pub fn draw_held(field: &Field) {
    for (_, entity) in field.held() {
        draw_entity(entity);
        draw_circle_lines(entity.pos.x, entity.pos.y, entity.radius + 2.0, 1.0, HELD_OUTLINE);
    }
}
