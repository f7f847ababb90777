use crate::game::GameMode;
use crate::geometry::{Playfield, Rect};
use crate::settings::Difficulty;

const BUTTON_WIDTH: i32 = 20;
const BUTTON_HEIGHT: i32 = 3;
const BUTTON_GAP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Settings,
    Help,
    Exit,
    Difficulty(Difficulty),
    Back,
}

impl MenuButton {
    pub fn get_label(&self) -> &'static str {
        match self {
            MenuButton::Play => "Play",
            MenuButton::Settings => "Settings",
            MenuButton::Help => "Help",
            MenuButton::Exit => "Exit",
            MenuButton::Difficulty(difficulty) => difficulty.get_name(),
            MenuButton::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub kind: MenuButton,
    pub rect: Rect,
}

pub const HELP_TEXT: [&str; 7] = [
    "Shoot down the fleet before it reaches you.",
    "",
    "Left/Right or A/D   move the ship",
    "Space               fire",
    "G                   start a new game",
    "Esc                 back to the menu",
    "Q                   quit",
];

/// Button layout for the non-gameplay screens, in playfield coordinates.
#[derive(Debug, Clone)]
pub struct Menu {
    main: Vec<Button>,
    settings: Vec<Button>,
    help: Vec<Button>,
}

impl Menu {
    pub fn new(playfield: Playfield) -> Self {
        let main = stack(
            playfield,
            &[
                MenuButton::Play,
                MenuButton::Settings,
                MenuButton::Help,
                MenuButton::Exit,
            ],
            0,
        );
        let settings = stack(
            playfield,
            &[
                MenuButton::Difficulty(Difficulty::Easy),
                MenuButton::Difficulty(Difficulty::Normal),
                MenuButton::Difficulty(Difficulty::Hard),
                MenuButton::Back,
            ],
            0,
        );
        // Leave room for the help text above the button
        let help_offset = HELP_TEXT.len() as i32 / 2 + BUTTON_HEIGHT;
        let help = stack(playfield, &[MenuButton::Back], help_offset);

        Self {
            main,
            settings,
            help,
        }
    }

    /// Buttons shown in `mode`; none while playing.
    pub fn buttons(&self, mode: GameMode) -> &[Button] {
        match mode {
            GameMode::Menu | GameMode::GameOver => &self.main,
            GameMode::Settings => &self.settings,
            GameMode::Help => &self.help,
            GameMode::Active => &[],
        }
    }

    pub fn button_at(&self, mode: GameMode, x: i32, y: i32) -> Option<MenuButton> {
        self.buttons(mode)
            .iter()
            .find(|button| button.rect.contains(x, y))
            .map(|button| button.kind)
    }
}

/// Centres `kinds` as a vertical column, shifted down by `offset` rows.
fn stack(playfield: Playfield, kinds: &[MenuButton], offset: i32) -> Vec<Button> {
    let count = kinds.len() as i32;
    let total_height = count * BUTTON_HEIGHT + (count - 1).max(0) * BUTTON_GAP;
    let x = (playfield.width as i32 - BUTTON_WIDTH) / 2;
    let top = (playfield.height as i32 - total_height) / 2 + offset;

    kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| Button {
            kind,
            rect: Rect::new(
                x,
                top + i as i32 * (BUTTON_HEIGHT + BUTTON_GAP),
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
        })
        .collect()
}
