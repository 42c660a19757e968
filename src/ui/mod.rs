//! Terminal presentation: scene rendering plus menu overlays.

pub mod scene;
pub mod screens;

use crate::game::types::{GamePhase, World};
use ratatui::Frame;

/// Compose one frame: the scene everywhere, with the HUD or the phase's
/// overlay on top.
pub fn draw(frame: &mut Frame, world: &World) {
    let area = frame.size();
    scene::render_scene(frame, area, world);

    match world.phase {
        GamePhase::Idle => screens::render_start_screen(frame, area, world),
        GamePhase::Playing => screens::render_hud(frame, area, world),
        GamePhase::GameOver { revealed, .. } => {
            if revealed {
                screens::render_game_over_screen(frame, area, world);
            } else {
                screens::render_hud(frame, area, world);
            }
        }
    }
}
