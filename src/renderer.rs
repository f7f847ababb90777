use crate::entities::{ALIEN_SPRITE, Alien, Bullet, Entity, SHIP_SPRITE, Ship, Star};
use crate::game::{Game, GameMode};
use crate::geometry;
use crate::menu::{Button, HELP_TEXT, Menu, MenuButton};
use crate::settings::Difficulty;
use crate::stats::GameStats;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Terminal rows above the playfield used by the scoreboard
pub const HUD_HEIGHT: u16 = 1;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub mode: GameMode,
    pub paused: bool,
    pub ship: &'a Ship,
    pub bullets: &'a [Bullet],
    pub aliens: &'a [Alien],
    pub stars: &'a [Star],
    pub stats: &'a GameStats,
    pub menu: &'a Menu,
    pub difficulty: Difficulty,
    pub playfield: geometry::Playfield,
    pub area: Rect,
}

impl<'a> RenderView<'a> {
    pub fn new(game: &'a Game, area: Rect) -> Self {
        Self {
            mode: game.mode(),
            paused: game.is_paused(),
            ship: game.ship(),
            bullets: game.bullets(),
            aliens: game.aliens(),
            stars: game.stars(),
            stats: game.stats(),
            menu: game.menu(),
            difficulty: game.settings().difficulty,
            playfield: game.playfield(),
            area,
        }
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let field_area = playfield_area(view.area, view.playfield);

        self.render_field(frame.buffer_mut(), field_area, view);

        match view.mode {
            GameMode::Active => {
                self.render_scoreboard(frame, view);
                if view.paused {
                    self.render_life_lost(frame, field_area, view);
                }
            }
            GameMode::Menu | GameMode::GameOver | GameMode::Settings | GameMode::Help => {
                self.render_menu(frame, field_area, view);
            }
        }
    }

    /// Stars, ship, aliens and bullets, drawn cell by cell and clipped to the
    /// playfield.
    fn render_field(&self, buffer: &mut Buffer, field_area: Rect, view: &RenderView) {
        let star_style = Style::default().fg(Color::DarkGray);
        for star in view.stars {
            let bounds = star.bounds();
            put_char(buffer, field_area, bounds.x, bounds.y, star.glyph, star_style);
        }

        let ship_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        draw_sprite(buffer, field_area, view.ship.bounds(), &SHIP_SPRITE, ship_style);

        let alien_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        for alien in view.aliens {
            draw_sprite(buffer, field_area, alien.bounds(), &ALIEN_SPRITE, alien_style);
        }

        let bullet_style = Style::default().fg(Color::Yellow);
        for bullet in view.bullets {
            let bounds = bullet.bounds();
            for y in bounds.top()..bounds.bottom() {
                for x in bounds.left()..bounds.right() {
                    put_char(buffer, field_area, x, y, '|', bullet_style);
                }
            }
        }
    }

    fn render_scoreboard(&self, frame: &mut Frame, view: &RenderView) {
        let label = Style::default().fg(Color::DarkGray);
        let stats_line = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                view.stats.score_text(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  High: ", label),
            Span::styled(
                view.stats.high_score_text(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", label),
            Span::styled(
                view.stats.level_text(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Ships: ", label),
            Span::styled(
                view.stats.ships_text("^"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: view.area.x + 1,
            y: view.area.y,
            width: view.area.width.saturating_sub(2),
            height: HUD_HEIGHT.min(view.area.height),
        };
        frame.render_widget(Paragraph::new(stats_line), stats_area);
    }

    fn render_life_lost(&self, frame: &mut Frame, field_area: Rect, view: &RenderView) {
        let text = vec![
            Line::from("SHIP LOST").centered().bold().red(),
            Line::from(format!("{} left", view.stats.ships_left))
                .centered()
                .white(),
        ];
        let banner = centered_rect(field_area, 24, 4);
        frame.render_widget(Clear, banner);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            banner,
        );
    }

    fn render_menu(&self, frame: &mut Frame, field_area: Rect, view: &RenderView) {
        let title = match view.mode {
            GameMode::GameOver => Line::from("GAME OVER").centered().red().bold(),
            GameMode::Settings => Line::from("SETTINGS").centered().yellow().bold(),
            GameMode::Help => Line::from("HELP").centered().yellow().bold(),
            _ => Line::from("ALIEN INVASION").centered().green().bold(),
        };
        let mut header = vec![title];
        if view.mode == GameMode::GameOver {
            header.push(
                Line::from(format!("Final Score: {}", view.stats.score_text()))
                    .centered()
                    .yellow(),
            );
        }
        if view.stats.high_score > 0 {
            header.push(
                Line::from(format!("High Score: {}", view.stats.high_score_text()))
                    .centered()
                    .white(),
            );
        }
        let header_area = Rect {
            x: field_area.x,
            y: field_area.y + 1,
            width: field_area.width,
            height: (header.len() as u16).min(field_area.height),
        };
        frame.render_widget(Clear, header_area);
        frame.render_widget(Paragraph::new(header), header_area);

        if view.mode == GameMode::Help {
            let text: Vec<Line> = HELP_TEXT.iter().map(|line| Line::from(*line)).collect();
            let help_area = centered_rect(field_area, 48, HELP_TEXT.len() as u16 + 2);
            let help_area = Rect {
                y: help_area.y.saturating_sub(HELP_TEXT.len() as u16 / 2),
                ..help_area
            };
            frame.render_widget(Clear, help_area);
            frame.render_widget(
                Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
                help_area,
            );
        }

        for button in view.menu.buttons(view.mode) {
            let selected = button.kind == MenuButton::Difficulty(view.difficulty);
            self.render_button(frame, field_area, button, selected);
        }

        if view.mode.is_main_menu() {
            let hint = Line::from(vec![Span::styled(
                "[G: Start] [Click: Select] [Q: Quit]",
                Style::default().fg(Color::DarkGray),
            )]);
            let hint_area = Rect {
                x: field_area.x,
                y: field_area.y + field_area.height.saturating_sub(1),
                width: field_area.width,
                height: 1.min(field_area.height),
            };
            frame.render_widget(Paragraph::new(hint).centered(), hint_area);
        }
    }

    fn render_button(&self, frame: &mut Frame, field_area: Rect, button: &Button, selected: bool) {
        let Some(area) = clip(field_area, button.rect) else {
            return;
        };
        let color = if selected { Color::Yellow } else { Color::White };
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Line::from(button.kind.get_label()).bold())
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Where the playfield sits inside the terminal: directly below the
/// scoreboard, clipped to what the terminal can show.
pub fn playfield_area(area: Rect, playfield: geometry::Playfield) -> Rect {
    let y = area.y + HUD_HEIGHT.min(area.height);
    Rect {
        x: area.x,
        y,
        width: playfield.width.min(area.width),
        height: playfield.height.min(area.height.saturating_sub(y - area.y)),
    }
}

/// Converts a playfield rectangle to terminal cells, `None` when fully
/// outside `field_area`.
fn clip(field_area: Rect, rect: geometry::Rect) -> Option<Rect> {
    let left = rect.left().max(0);
    let top = rect.top().max(0);
    let right = rect.right().min(field_area.width as i32);
    let bottom = rect.bottom().min(field_area.height as i32);
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect {
        x: field_area.x + left as u16,
        y: field_area.y + top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

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

fn put_char(buffer: &mut Buffer, field_area: Rect, x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 || x >= field_area.width as i32 || y >= field_area.height as i32 {
        return;
    }
    let position = (field_area.x + x as u16, field_area.y + y as u16);
    if let Some(cell) = buffer.cell_mut(position) {
        cell.set_char(ch).set_style(style);
    }
}

fn draw_sprite(
    buffer: &mut Buffer,
    field_area: Rect,
    bounds: geometry::Rect,
    lines: &[&str],
    style: Style,
) {
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch != ' ' {
                put_char(
                    buffer,
                    field_area,
                    bounds.x + col as i32,
                    bounds.y + row as i32,
                    ch,
                    style,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_playfield_sits_below_scoreboard() {
        let area = Rect::new(0, 0, 100, 40);
        let field = playfield_area(area, geometry::Playfield::new(80, 36));
        assert_eq!(field, Rect::new(0, 1, 80, 36));

        let small = playfield_area(Rect::new(0, 0, 60, 20), geometry::Playfield::new(80, 36));
        assert_eq!(small, Rect::new(0, 1, 60, 19));
    }

    #[test]
    fn test_clip_partially_visible_rect() {
        let field = Rect::new(0, 1, 80, 36);
        assert_eq!(
            clip(field, geometry::Rect::new(-2, -1, 5, 3)),
            Some(Rect::new(0, 1, 3, 2))
        );
        assert_eq!(clip(field, geometry::Rect::new(0, -3, 1, 1)), None);
    }

    #[test]
    fn test_active_frame_draws_ship_and_scoreboard() {
        let mut game = Game::with_seed(Settings::default(), 5);
        game.start_game();

        let mut terminal = Terminal::new(TestBackend::new(80, 37)).unwrap();
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView::new(&game, frame.area());
                renderer.render(frame, &view);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let top_row: String = (0..80).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(top_row.contains("Score: 0"));
        assert!(top_row.contains("Level 1"));

        // ship nose at x 37 + 2, playfield row 32 => terminal row 33
        assert_eq!(buffer[(39, 33)].symbol(), "^");
    }

    #[test]
    fn test_menu_frame_shows_buttons() {
        let game = Game::with_seed(Settings::default(), 5);
        let mut terminal = Terminal::new(TestBackend::new(80, 37)).unwrap();
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView::new(&game, frame.area());
                renderer.render(frame, &view);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..37)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("ALIEN INVASION"));
        assert!(screen.contains("Play"));
        assert!(screen.contains("Exit"));
    }
}
