//! The game-state machine.
//!
//! [`Game`] owns every entity collection, the stats and the current mode, and
//! is the only thing that mutates them. One call to [`Game::update`] is one
//! tick; input arrives beforehand through [`Game::handle_event`].

use std::time::Instant;

use tracing::{debug, info};

use crate::collision::{remove_indices, resolve_bullet_alien, resolve_ship_alien};
use crate::entities::{Alien, Bullet, Entity, SHIP_HEIGHT, Ship, Star};
use crate::fleet::{Fleet, FleetDirection};
use crate::geometry::Playfield;
use crate::input::{InputEvent, Key};
use crate::menu::{Menu, MenuButton};
use crate::settings::{Difficulty, Settings};
use crate::starfield::Starfield;
use crate::stats::GameStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Settings,
    Help,
    Active,
    GameOver,
}

impl GameMode {
    /// Modes that show the main menu buttons and accept the start key.
    pub fn is_main_menu(&self) -> bool {
        matches!(self, GameMode::Menu | GameMode::GameOver)
    }
}

/// Sub-state of [`GameMode::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Gameplay frozen after losing a ship
    LifeLost { until: Instant },
}

/// Things that happened during a tick, for sound and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Fired,
    AliensDestroyed(u32),
    LevelUp(u32),
    ShipLost { ships_left: u32 },
    GameOver { score: u32 },
}

pub struct Game {
    settings: Settings,
    playfield: Playfield,
    mode: GameMode,
    phase: Phase,
    stats: GameStats,
    ship: Ship,
    bullets: Vec<Bullet>,
    fleet: Fleet,
    starfield: Starfield,
    menu: Menu,
    /// Fire pressed since the last tick
    fire_requested: bool,
    pointer_visible: bool,
    running: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let starfield = Starfield::new(&settings, settings.playfield());
        Self::with_starfield(settings, starfield)
    }

    /// Same as [`Game::new`] with a reproducible starfield.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        let starfield = Starfield::with_seed(&settings, settings.playfield(), seed);
        Self::with_starfield(settings, starfield)
    }

    fn with_starfield(settings: Settings, starfield: Starfield) -> Self {
        let playfield = settings.playfield();
        Self {
            playfield,
            mode: GameMode::Menu,
            phase: Phase::Running,
            stats: GameStats::new(settings.initial_lives),
            ship: Ship::new(playfield, settings.ship_speed),
            bullets: Vec::new(),
            fleet: Fleet::empty(settings.fleet_direction),
            starfield,
            menu: Menu::new(playfield),
            fire_requested: false,
            pointer_visible: true,
            running: true,
            events: Vec::new(),
            settings,
        }
    }

    /// Live settings, including speeds scaled by level-ups.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Size of the area the game is played in.
    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Screen the game is currently on.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Sub-state of an active game.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while frozen after a lost ship.
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::LifeLost { .. })
    }

    /// Score, level and remaining ships.
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Mutable access to the scoreboard.
    pub fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }

    /// The player's ship.
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Mutable access to the ship.
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    /// Bullets currently in flight.
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Mutable access to the bullets in flight.
    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }

    /// The alien fleet and its heading.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Mutable access to the fleet.
    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// Live aliens of the current wave.
    pub fn aliens(&self) -> &[Alien] {
        self.fleet.aliens()
    }

    /// Background stars.
    pub fn stars(&self) -> &[Star] {
        self.starfield.stars()
    }

    /// Button layout of the menu screens.
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Whether the mouse pointer should be captured for the menus.
    pub fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }

    /// False once quit has been requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Applies one input event to the current mode.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::QuitRequested | InputEvent::KeyDown(Key::Quit) => self.quit(),
            InputEvent::KeyDown(key) => self.on_key_down(key),
            InputEvent::KeyUp(key) => self.on_key_up(key),
            InputEvent::MouseClick { x, y } => self.on_click(x, y),
        }
    }

    fn on_key_down(&mut self, key: Key) {
        let accepts_gameplay = self.mode == GameMode::Active && self.phase == Phase::Running;
        match key {
            Key::Left if accepts_gameplay => self.ship.moving_left = true,
            Key::Right if accepts_gameplay => self.ship.moving_right = true,
            Key::Fire if accepts_gameplay => self.fire_requested = true,
            Key::Escape if matches!(self.mode, GameMode::Settings | GameMode::Help) => {
                self.mode = GameMode::Menu;
            }
            Key::Start if self.mode != GameMode::Active => self.start_game(),
            _ => {}
        }
    }

    fn on_key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.ship.moving_left = false,
            Key::Right => self.ship.moving_right = false,
            _ => {}
        }
    }

    fn on_click(&mut self, x: i32, y: i32) {
        let Some(button) = self.menu.button_at(self.mode, x, y) else {
            return;
        };
        debug!(?button, "menu button clicked");
        match button {
            MenuButton::Play => self.start_game(),
            MenuButton::Settings => self.mode = GameMode::Settings,
            MenuButton::Help => self.mode = GameMode::Help,
            MenuButton::Exit => self.quit(),
            MenuButton::Difficulty(difficulty) => self.select_difficulty(difficulty),
            MenuButton::Back => self.mode = GameMode::Menu,
        }
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) {
        info!(difficulty = difficulty.get_name(), "difficulty selected");
        self.settings.difficulty = difficulty;
    }

    fn quit(&mut self) {
        info!("quit requested");
        self.running = false;
    }

    /// Resets stats and entities and switches to [`GameMode::Active`].
    pub fn start_game(&mut self) {
        self.settings.initialize_dynamic_settings();
        self.ship.set_speed(self.settings.ship_speed);
        self.stats.reset();
        self.bullets.clear();
        self.fleet.clear();
        self.ship.center(self.playfield);
        self.ship.stop();
        self.fleet = self.spawn_fleet(self.settings.fleet_direction);
        self.fire_requested = false;
        self.mode = GameMode::Active;
        self.phase = Phase::Running;
        self.pointer_visible = false;
        self.events.push(GameEvent::Started);
        info!(
            difficulty = self.settings.difficulty.get_name(),
            aliens = self.fleet.len(),
            "game started"
        );
    }

    /// Advances the game by one tick.
    pub fn update(&mut self, now: Instant) {
        self.starfield.advance(self.playfield);

        if self.mode == GameMode::Active {
            self.update_active(now);
        }
    }

    fn update_active(&mut self, now: Instant) {
        if let Phase::LifeLost { until } = self.phase {
            if now < until {
                return;
            }
            debug!("pause over, resuming");
            self.phase = Phase::Running;
        }

        self.ship.advance();
        if std::mem::take(&mut self.fire_requested) {
            self.fire_bullet();
        }
        self.update_bullets();
        self.check_bullet_alien_collisions();
        self.update_fleet(now);
    }

    fn fire_bullet(&mut self) {
        if self.bullets.len() < self.settings.max_live_bullets {
            self.bullets.push(Bullet::fired_from(
                &self.ship,
                self.settings.bullet_width,
                self.settings.bullet_height,
                self.settings.bullet_speed,
            ));
            self.events.push(GameEvent::Fired);
        }
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|bullet| !bullet.is_off_top());
    }

    fn check_bullet_alien_collisions(&mut self) {
        let report = resolve_bullet_alien(&self.bullets, self.fleet.aliens());

        if !report.is_empty() {
            // Every alien counts, also when one bullet hit several
            for hit in &report.hits {
                self.stats
                    .add_score(self.settings.points_per_alien * hit.aliens.len() as u32);
            }
            if self.stats.check_high_score() {
                debug!(high_score = self.stats.high_score, "new high score");
            }

            let kills = report.kills() as u32;
            let alien_indices: Vec<usize> = report.alien_indices().collect();
            remove_indices(&mut self.bullets, report.bullet_indices());
            self.fleet.remove(&alien_indices);
            self.events.push(GameEvent::AliensDestroyed(kills));
            debug!(kills, score = self.stats.score, "aliens destroyed");
        }

        if self.fleet.is_empty() {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.bullets.clear();
        self.settings.increase_speed();
        self.ship.set_speed(self.settings.ship_speed);
        self.starfield.set_speed(self.settings.star_speed);
        self.stats.level += 1;
        self.fleet = self.spawn_fleet(self.fleet.direction());
        self.events.push(GameEvent::LevelUp(self.stats.level));
        info!(
            level = self.stats.level,
            alien_speed = self.settings.alien_speed,
            "wave cleared"
        );
    }

    fn update_fleet(&mut self, now: Instant) {
        self.fleet.advance(&self.settings, self.playfield);

        if resolve_ship_alien(&self.ship, self.fleet.aliens())
            || self.fleet.reached_bottom(self.playfield)
        {
            self.ship_hit(now);
        }
    }

    fn ship_hit(&mut self, now: Instant) {
        self.fleet.clear();
        self.bullets.clear();
        self.ship.center(self.playfield);
        self.ship.stop();
        self.fire_requested = false;

        let ships_left = self.stats.lose_ship();
        self.events.push(GameEvent::ShipLost { ships_left });

        if ships_left > 0 {
            self.fleet = self.spawn_fleet(self.fleet.direction());
            self.phase = Phase::LifeLost {
                until: now + self.settings.life_lost_pause,
            };
            info!(ships_left, "ship lost");
        } else {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.stats.check_high_score();
        self.settings.initialize_dynamic_settings();
        self.settings.reset_star_speed();
        self.ship.set_speed(self.settings.ship_speed);
        self.starfield.set_speed(self.settings.star_speed);
        self.mode = GameMode::GameOver;
        self.phase = Phase::Running;
        self.pointer_visible = true;
        self.events.push(GameEvent::GameOver {
            score: self.stats.score,
        });
        info!(
            score = self.stats.score,
            high_score = self.stats.high_score,
            level = self.stats.level,
            "game over"
        );
    }

    /// A fresh wave heading `direction`. Waves after the first keep the
    /// heading the previous one ended with.
    fn spawn_fleet(&self, direction: FleetDirection) -> Fleet {
        Fleet::spawn(&self.settings, self.playfield, SHIP_HEIGHT, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::with_seed(Settings::default(), 11)
    }

    #[test]
    fn test_new_game_waits_in_menu() {
        let game = game();
        assert_eq!(game.mode(), GameMode::Menu);
        assert!(game.aliens().is_empty());
        assert!(game.pointer_visible());
        assert_eq!(game.stars().len(), game.settings().star_capacity());
    }

    #[test]
    fn test_start_key_starts_game() {
        let mut game = game();
        game.handle_event(InputEvent::KeyDown(Key::Start));
        assert_eq!(game.mode(), GameMode::Active);
        assert_eq!(game.aliens().len(), 36);
        assert!(!game.pointer_visible());
        assert_eq!(game.take_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_start_key_ignored_while_active() {
        let mut game = game();
        game.start_game();
        game.stats_mut().add_score(100);
        game.handle_event(InputEvent::KeyDown(Key::Start));
        assert_eq!(game.stats().score, 100);
    }

    #[test]
    fn test_menu_navigation_by_click_and_escape() {
        let mut game = game();
        let settings_button = game.menu().buttons(GameMode::Menu)[1].rect;
        game.handle_event(InputEvent::MouseClick {
            x: settings_button.x,
            y: settings_button.y,
        });
        assert_eq!(game.mode(), GameMode::Settings);

        let hard = game.menu().buttons(GameMode::Settings)[2].rect;
        game.handle_event(InputEvent::MouseClick { x: hard.x, y: hard.y });
        assert_eq!(game.settings().difficulty, Difficulty::Hard);

        game.handle_event(InputEvent::KeyDown(Key::Escape));
        assert_eq!(game.mode(), GameMode::Menu);

        let help = game.menu().buttons(GameMode::Menu)[2].rect;
        game.handle_event(InputEvent::MouseClick { x: help.x, y: help.y });
        assert_eq!(game.mode(), GameMode::Help);
        let back = game.menu().buttons(GameMode::Help)[0].rect;
        game.handle_event(InputEvent::MouseClick { x: back.x, y: back.y });
        assert_eq!(game.mode(), GameMode::Menu);
    }

    #[test]
    fn test_play_button_starts_with_selected_difficulty() {
        let mut game = game();
        game.select_difficulty(Difficulty::Easy);
        let play = game.menu().buttons(GameMode::Menu)[0].rect;
        game.handle_event(InputEvent::MouseClick { x: play.x, y: play.y });
        assert_eq!(game.mode(), GameMode::Active);
        assert_eq!(
            game.settings().alien_speed,
            game.settings().base_alien_speed * 0.75
        );
    }

    #[test]
    fn test_exit_button_and_quit_key_stop_running() {
        let mut game = game();
        let exit = game.menu().buttons(GameMode::Menu)[3].rect;
        game.handle_event(InputEvent::MouseClick { x: exit.x, y: exit.y });
        assert!(!game.is_running());

        let mut game = Game::with_seed(Settings::default(), 1);
        game.handle_event(InputEvent::KeyDown(Key::Quit));
        assert!(!game.is_running());

        let mut game = Game::with_seed(Settings::default(), 1);
        game.handle_event(InputEvent::QuitRequested);
        assert!(!game.is_running());
    }

    #[test]
    fn test_movement_keys_set_and_clear_flags() {
        let mut game = game();
        game.start_game();
        game.handle_event(InputEvent::KeyDown(Key::Left));
        game.handle_event(InputEvent::KeyDown(Key::Right));
        assert!(game.ship().moving_left && game.ship().moving_right);
        game.handle_event(InputEvent::KeyUp(Key::Left));
        assert!(!game.ship().moving_left && game.ship().moving_right);
    }

    #[test]
    fn test_movement_keys_ignored_in_menu() {
        let mut game = game();
        game.handle_event(InputEvent::KeyDown(Key::Right));
        game.handle_event(InputEvent::KeyDown(Key::Fire));
        game.update(Instant::now());
        assert!(!game.ship().moving_right);
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_fire_spawns_one_bullet_per_press() {
        let mut game = game();
        game.start_game();
        game.take_events();
        game.handle_event(InputEvent::KeyDown(Key::Fire));
        game.update(Instant::now());
        assert_eq!(game.bullets().len(), 1);
        assert!(game.take_events().contains(&GameEvent::Fired));

        game.update(Instant::now());
        assert_eq!(game.bullets().len(), 1);
    }

    #[test]
    fn test_bullet_limit() {
        let mut game = game();
        game.start_game();
        // Few enough ticks that no bullet reaches the fleet yet
        for _ in 0..5 {
            game.handle_event(InputEvent::KeyDown(Key::Fire));
            game.update(Instant::now());
        }
        assert_eq!(game.bullets().len(), game.settings().max_live_bullets);
    }

    #[test]
    fn test_bullets_culled_off_top() {
        let mut game = game();
        game.start_game();
        game.fleet = Fleet::from_aliens(vec![Alien::new(60.0, 20.0)], game.fleet.direction());
        game.bullets_mut().push(Bullet::new(2.0, 0.5, 1, 1, 2.0));
        game.update(Instant::now());
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_starfield_keeps_moving_in_menu() {
        let mut game = game();
        let before: Vec<f32> = game.stars().iter().map(|s| s.body().y).collect();
        game.update(Instant::now());
        let after: Vec<f32> = game.stars().iter().map(|s| s.body().y).collect();
        assert_eq!(after.len(), before.len());
        assert_ne!(before, after);
    }
}
