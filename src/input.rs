use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Game keys the state machine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
    Escape,
    Start,
}

/// Discrete input handed to the game once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Click position in terminal cells
    MouseClick { x: i32, y: i32 },
    QuitRequested,
}

/// Polls crossterm and translates raw events into [`InputEvent`]s.
pub struct InputManager {
    /// Terminal reports key releases (keyboard enhancement is active)
    reports_releases: bool,
    events: Vec<InputEvent>,
}

impl InputManager {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            reports_releases,
            events: Vec::new(),
        }
    }

    /// Drains every pending event without blocking.
    pub fn poll_events(&mut self) -> color_eyre::Result<&[InputEvent]> {
        self.events.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    let translated = translate_key(key_event, self.reports_releases);
                    self.events.extend(translated);
                }
                Event::Mouse(mouse_event) => {
                    if let Some(click) = translate_mouse(mouse_event) {
                        self.events.push(click);
                    }
                }
                _ => {}
            }
        }

        Ok(&self.events)
    }
}

fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Key::Start),
        _ => None,
    }
}

/// Translates one key event.
///
/// Without release reporting a held key cannot be detected, so a direction
/// press also releases the opposite direction and Down / `s` releases both.
pub fn translate_key(key_event: KeyEvent, reports_releases: bool) -> Vec<InputEvent> {
    if key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return vec![InputEvent::QuitRequested];
    }

    match key_event.kind {
        KeyEventKind::Press => {
            if !reports_releases
                && matches!(
                    key_event.code,
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')
                )
            {
                return vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyUp(Key::Right)];
            }

            let Some(key) = game_key(key_event.code) else {
                return Vec::new();
            };
            match (key, reports_releases) {
                (Key::Left, false) => vec![InputEvent::KeyUp(Key::Right), InputEvent::KeyDown(key)],
                (Key::Right, false) => vec![InputEvent::KeyUp(Key::Left), InputEvent::KeyDown(key)],
                _ => vec![InputEvent::KeyDown(key)],
            }
        }
        KeyEventKind::Release => game_key(key_event.code)
            .map(|key| vec![InputEvent::KeyUp(key)])
            .unwrap_or_default(),
        // Auto-repeat must not re-fire or restart anything
        KeyEventKind::Repeat => Vec::new(),
    }
}

pub fn translate_mouse(mouse_event: MouseEvent) -> Option<InputEvent> {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseClick {
            x: mouse_event.column as i32,
            y: mouse_event.row as i32,
        }),
        _ => None,
    }
}
