//! Scene renderer: translates world state into terminal cells each frame.
//!
//! The 360x640 world is sampled onto the cell grid of whatever area the
//! scene gets. Layers paint back to front: sky gradient, stars, ground,
//! pipes, particles, bird.

use crate::game::types::{floor_y, ParticleKind, Pipe, World, PIPE_W, WORLD_H, WORLD_W};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sky gradient endpoints and fixed palette of the neon theme.
const SKY_TOP: (u8, u8, u8) = (0x00, 0x00, 0x33);
const SKY_BOTTOM: (u8, u8, u8) = (0x00, 0x00, 0x66);
const GROUND: (u8, u8, u8) = (0x00, 0x33, 0x66);
const NEON: Color = Color::Rgb(0x00, 0xff, 0xff);

/// Spacing of the vertical grid lines on the ground strip, in world units.
const GROUND_GRID_STEP: f64 = 20.0;

/// One terminal cell of the composed scene.
#[derive(Clone)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Terminal column covering world x, clamped into range.
    fn col(&self, wx: f64) -> usize {
        let col = (wx / WORLD_W * self.width as f64).floor();
        (col.max(0.0) as usize).min(self.width - 1)
    }

    fn row(&self, wy: f64) -> usize {
        let row = (wy / WORLD_H * self.height as f64).floor();
        (row.max(0.0) as usize).min(self.height - 1)
    }

    /// World coordinates of a cell's center.
    fn world_at(&self, col: usize, row: usize) -> (f64, f64) {
        (
            (col as f64 + 0.5) / self.width as f64 * WORLD_W,
            (row as f64 + 0.5) / self.height as f64 * WORLD_H,
        )
    }

    fn paint(&mut self, col: usize, row: usize, ch: char, fg: Color) {
        let cell = &mut self.cells[row * self.width + col];
        cell.ch = ch;
        cell.fg = fg;
    }

    fn in_world(wx: f64, wy: f64) -> bool {
        wx >= 0.0 && wx < WORLD_W && wy >= 0.0 && wy < WORLD_H
    }
}

/// Render the full scene into `area`.
pub fn render_scene(frame: &mut Frame, area: Rect, world: &World) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let mut canvas = Canvas {
        width,
        height,
        cells: vec![
            Cell {
                ch: ' ',
                fg: Color::Reset,
                bg: Color::Reset,
            };
            width * height
        ],
    };

    paint_background(&mut canvas);
    paint_stars(&mut canvas, world);
    paint_ground(&mut canvas);
    for pipe in &world.pipes {
        paint_pipe(&mut canvas, pipe);
    }
    paint_particles(&mut canvas, world);
    paint_bird(&mut canvas, world);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let cell = &canvas.cells[row * width + col];
            spans.push(Span::styled(
                cell.ch.to_string(),
                Style::default().fg(cell.fg).bg(cell.bg),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Vertical sky gradient from deep to lighter blue.
fn paint_background(canvas: &mut Canvas) {
    for row in 0..canvas.height {
        let t = row as f64 / canvas.height.max(1) as f64;
        let blue = lerp(SKY_TOP.2, SKY_BOTTOM.2, t);
        let bg = Color::Rgb(SKY_TOP.0, SKY_TOP.1, blue);
        for col in 0..canvas.width {
            canvas.cells[row * canvas.width + col].bg = bg;
        }
    }
}

fn paint_stars(canvas: &mut Canvas, world: &World) {
    for star in &world.stars {
        if star.y >= floor_y() || !Canvas::in_world(star.x, star.y) {
            continue;
        }
        let level = (star.brightness * 255.0) as u8;
        let ch = if star.size > 1.5 { '✦' } else { '·' };
        let (col, row) = (canvas.col(star.x), canvas.row(star.y));
        canvas.paint(col, row, ch, Color::Rgb(level, level, level));
    }
}

/// Ground strip: neon top edge, then dark blue with faint grid lines.
fn paint_ground(canvas: &mut Canvas) {
    let edge_row = canvas.row(floor_y());
    let cell_w = WORLD_W / canvas.width as f64;

    for row in edge_row..canvas.height {
        for col in 0..canvas.width {
            let (wx, _) = canvas.world_at(col, row);
            let cell = &mut canvas.cells[row * canvas.width + col];
            cell.bg = Color::Rgb(GROUND.0, GROUND.1, GROUND.2);
            if row == edge_row {
                cell.ch = '─';
                cell.fg = NEON;
            } else if wx % GROUND_GRID_STEP < cell_w {
                cell.ch = '│';
                cell.fg = Color::Rgb(0x00, 0x60, 0x60);
            } else {
                cell.ch = ' ';
            }
        }
    }
}

fn paint_pipe(canvas: &mut Canvas, pipe: &Pipe) {
    // Lip thickness around the gap edges, in world units.
    const LIP: f64 = 10.0;

    if pipe.x + PIPE_W < 0.0 || pipe.x >= WORLD_W {
        return;
    }
    let col_from = canvas.col(pipe.x.max(0.0));
    let col_to = canvas.col((pipe.x + PIPE_W).min(WORLD_W - 1.0));

    for col in col_from..=col_to {
        for row in 0..canvas.height {
            let (_, wy) = canvas.world_at(col, row);
            if wy >= floor_y() {
                break;
            }
            if wy < pipe.top || wy > pipe.bottom {
                let lip = (wy >= pipe.top - LIP && wy < pipe.top)
                    || (wy > pipe.bottom && wy <= pipe.bottom + LIP);
                let fg = if lip { Color::White } else { NEON };
                canvas.paint(col, row, '█', fg);
            }
        }
    }
}

fn paint_particles(canvas: &mut Canvas, world: &World) {
    for particle in &world.particles {
        if !Canvas::in_world(particle.x, particle.y) {
            continue;
        }
        let alpha = particle.alpha.clamp(0.0, 1.0);
        let (r, g, b) = match particle.kind {
            ParticleKind::Trail => (0x00, 0xff, 0xff),
            ParticleKind::Score => (0xff, 0xff, 0x00),
            ParticleKind::Explosion => (0xff, 0x00, 0x00),
        };
        let fg = Color::Rgb(
            (r as f64 * alpha) as u8,
            (g as f64 * alpha) as u8,
            (b as f64 * alpha) as u8,
        );
        let ch = if particle.size > 4.5 { '●' } else { '•' };
        let (col, row) = (canvas.col(particle.x), canvas.row(particle.y));
        canvas.paint(col, row, ch, fg);
    }
}

/// The bird is an ellipse rotated by its velocity tilt, with a white
/// highlight toward the upper left and a dark eye toward the beak.
fn paint_bird(canvas: &mut Canvas, world: &World) {
    let bird = &world.bird;
    let cx = bird.x + bird.width / 2.0;
    let cy = bird.y + bird.height / 2.0;
    let a = bird.width / 2.0;
    let b = bird.height / 2.0;
    let (sin, cos) = bird.rotation.sin_cos();

    let col_from = canvas.col(cx - a - 6.0);
    let col_to = canvas.col(cx + a + 6.0);
    let row_from = canvas.row((cy - b - 6.0).max(0.0));
    let row_to = canvas.row(cy + b + 6.0);

    for row in row_from..=row_to {
        for col in col_from..=col_to {
            let (wx, wy) = canvas.world_at(col, row);
            // Rotate the sample into the bird's local frame.
            let dx = wx - cx;
            let dy = wy - cy;
            let rx = dx * cos + dy * sin;
            let ry = -dx * sin + dy * cos;
            if (rx / a).powi(2) + (ry / b).powi(2) > 1.0 {
                continue;
            }

            let eye = ((rx - bird.width / 4.0).powi(2) + (ry + bird.height / 6.0).powi(2)).sqrt();
            let highlight = ((rx + 5.0).powi(2) + (ry + 5.0).powi(2)).sqrt();
            let fg = if eye < 5.0 {
                Color::Rgb(0x00, 0x10, 0x10)
            } else if highlight < bird.width / 4.0 {
                Color::White
            } else {
                NEON
            };
            canvas.paint(col, row, '█', fg);
        }
    }
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(0x33, 0x66, 0.0), 0x33);
        assert_eq!(lerp(0x33, 0x66, 1.0), 0x66);
        assert!(lerp(0x33, 0x66, 0.5) > 0x33);
    }

    #[test]
    fn test_canvas_mapping_clamps() {
        let canvas = Canvas {
            width: 80,
            height: 24,
            cells: vec![
                Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg: Color::Reset,
                };
                80 * 24
            ],
        };
        assert_eq!(canvas.col(-10.0), 0);
        assert_eq!(canvas.col(WORLD_W + 50.0), 79);
        assert_eq!(canvas.row(-1.0), 0);
        assert_eq!(canvas.row(WORLD_H * 2.0), 23);
    }

    #[test]
    fn test_world_at_inverts_col() {
        let canvas = Canvas {
            width: 90,
            height: 40,
            cells: vec![
                Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg: Color::Reset,
                };
                90 * 40
            ],
        };
        for col in [0usize, 13, 45, 89] {
            let (wx, _) = canvas.world_at(col, 0);
            assert_eq!(canvas.col(wx), col);
        }
    }
}
