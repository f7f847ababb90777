use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::time::Instant;
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::game::{Game, GameEvent};
use crate::input::{InputEvent, InputManager};
use crate::renderer::{GameRenderer, HUD_HEIGHT, RenderView};
use crate::settings::Settings;

/// The main application: owns the game and its terminal-facing collaborators.
pub struct App {
    game: Game,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    /// Mouse capture currently enabled on the terminal
    mouse_captured: bool,
}

impl App {
    pub fn new(
        settings: Settings,
        seed: Option<u64>,
        audio_manager: AudioManager,
        input_manager: InputManager,
    ) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(settings, seed),
            None => Game::new(settings),
        };
        Self {
            game,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
            mouse_captured: true,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = self.game.settings().tick_rate;

        while self.game.is_running() {
            let tick_start = Instant::now();

            let events: Vec<InputEvent> = self.input_manager.poll_events()?.to_vec();
            for event in events {
                self.game.handle_event(to_playfield(event));
            }

            self.game.update(Instant::now());
            for event in self.game.take_events() {
                self.on_game_event(event);
            }

            self.sync_mouse_capture()?;

            terminal.draw(|frame| {
                let view = RenderView::new(&self.game, frame.area());
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the tick to keep a steady pace
            if let Some(remaining) = tick_rate.checked_sub(tick_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        info!(high_score = self.game.stats().high_score, "exiting");
        Ok(())
    }

    fn on_game_event(&mut self, event: GameEvent) {
        debug!(?event, "game event");
        self.audio_manager.play(event);
    }

    /// Menus need the mouse; gameplay releases it back to the terminal.
    fn sync_mouse_capture(&mut self) -> Result<()> {
        let wanted = self.game.pointer_visible();
        if wanted != self.mouse_captured {
            if wanted {
                execute!(stdout(), EnableMouseCapture)?;
            } else {
                execute!(stdout(), DisableMouseCapture)?;
            }
            self.mouse_captured = wanted;
        }
        Ok(())
    }
}

/// Clicks arrive in terminal cells; the playfield starts below the scoreboard.
fn to_playfield(event: InputEvent) -> InputEvent {
    match event {
        InputEvent::MouseClick { x, y } => InputEvent::MouseClick {
            x,
            y: y - HUD_HEIGHT as i32,
        },
        other => other,
    }
}
