//! HUD and menu panels layered over the scene.

use crate::game::types::World;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Live score, top center, shown while a session is running.
pub fn render_hud(frame: &mut Frame, area: Rect, world: &World) {
    if area.height == 0 {
        return;
    }
    let score = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", world.score),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(
        score,
        Rect {
            y: area.y,
            height: 1,
            ..area
        },
    );
}

/// Start prompt shown while idle.
pub fn render_start_screen(frame: &mut Frame, area: Rect, world: &World) {
    let panel = centered_rect(area, 36, 9);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(" NEONFLAP ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let prompt = if world.has_played {
        "Press Space to fly again"
    } else {
        "Press Space to start"
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Guide the bird through the pipes",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            prompt,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("High score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", world.high_score),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// Final score panel, shown once the post-crash delay has elapsed.
pub fn render_game_over_screen(frame: &mut Frame, area: Rect, world: &World) {
    let panel = centered_rect(area, 36, 10);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(" GAME OVER ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let new_best = world.score > 0 && world.score == world.high_score;
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", world.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("High score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", world.high_score),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    if new_best {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Space to restart",
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// A rect of at most `width` x `height` cells, centered in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 36, 9);
        assert_eq!(rect.width, 36);
        assert_eq!(rect.height, 9);
        assert_eq!(rect.x, 22);
        assert!(rect.y > 0);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(area, 36, 9);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
