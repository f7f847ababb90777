/// Integration tests for game logic
///
/// These tests drive a whole [`Game`] tick by tick and check scoring, life
/// loss, level progression and the entity pools through the public API.
use alien_invasion::{
    Alien, Bullet, Entity, Fleet, FleetDirection, Game, GameEvent, GameMode, InputEvent, Key,
    Settings,
};
use std::time::{Duration, Instant};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn started_game() -> Game {
    let mut game = Game::with_seed(Settings::default(), 42);
    game.start_game();
    game.take_events();
    game
}

/// Replaces the fleet with a single alien sitting on top of the ship.
fn put_alien_on_ship(game: &mut Game) {
    let (x, y) = {
        let body = game.ship().body();
        (body.x, body.y)
    };
    *game.fleet_mut() = Fleet::from_aliens(vec![Alien::new(x, y - 1.0)], FleetDirection::Right);
}

fn alien_positions(game: &Game) -> Vec<(f32, f32)> {
    game.aliens()
        .iter()
        .map(|alien| (alien.body().x, alien.body().y))
        .collect()
}

#[test]
fn test_star_pool_stays_full() {
    let mut game = Game::with_seed(Settings::default(), 3);
    let capacity = game.settings().star_capacity();
    let start = Instant::now();
    for tick in 0..2_000u64 {
        game.update(start + Duration::from_millis(tick * 16));
        assert_eq!(game.stars().len(), capacity);
    }

    game.start_game();
    for _ in 0..500 {
        game.update(Instant::now());
        assert_eq!(game.stars().len(), capacity);
    }
}

#[test]
fn test_one_bullet_kills_every_overlapped_alien() {
    let mut game = started_game();
    *game.fleet_mut() = Fleet::from_aliens(
        vec![
            Alien::new(10.0, 10.0),
            Alien::new(12.0, 10.0),
            Alien::new(14.0, 10.0),
            Alien::new(40.0, 10.0),
        ],
        FleetDirection::Right,
    );
    game.bullets_mut().push(Bullet::new(14.0, 11.0, 1, 1, 0.0));

    game.update(Instant::now());

    assert_eq!(game.stats().score, 150);
    assert_eq!(game.stats().high_score, 150);
    assert!(game.bullets().is_empty());
    assert_eq!(game.aliens().len(), 1);
    assert!(game.take_events().contains(&GameEvent::AliensDestroyed(3)));
}

#[test]
fn test_losing_a_ship_respawns_and_pauses() {
    let mut game = started_game();
    let fleet_size = game.aliens().len();
    let alien_speed = game.settings().alien_speed;
    game.bullets_mut().push(Bullet::new(2.0, 20.0, 1, 1, 0.0));
    game.handle_event(InputEvent::KeyDown(Key::Right));
    put_alien_on_ship(&mut game);

    let now = Instant::now();
    game.update(now);

    assert_eq!(game.mode(), GameMode::Active);
    assert_eq!(game.stats().ships_left, 2);
    assert!(game.is_paused());
    assert_eq!(game.aliens().len(), fleet_size);
    assert!(game.bullets().is_empty());
    assert!(!game.ship().moving_right);
    assert_eq!(game.ship().body().x, 37.5);
    assert_eq!(game.settings().alien_speed, alien_speed);
    assert!(
        game.take_events()
            .contains(&GameEvent::ShipLost { ships_left: 2 })
    );

    // Frozen during the pause, movement keys included; the stars keep falling
    let frozen = alien_positions(&game);
    let stars_before: Vec<f32> = game.stars().iter().map(|s| s.body().y).collect();
    game.handle_event(InputEvent::KeyDown(Key::Left));
    game.update(now + Duration::from_millis(500));
    assert_eq!(alien_positions(&game), frozen);
    let stars_after: Vec<f32> = game.stars().iter().map(|s| s.body().y).collect();
    assert_ne!(stars_before, stars_after);
    assert!(!game.ship().moving_left);

    game.update(now + game.settings().life_lost_pause);
    assert!(!game.is_paused());
    assert_ne!(alien_positions(&game), frozen);
}

#[test]
fn test_last_ship_ends_the_game() {
    let mut game = started_game();

    // Clear a wave first so the speeds are above baseline
    game.fleet_mut().clear();
    game.update(Instant::now());
    assert_eq!(game.stats().level, 2);
    assert!(game.settings().alien_speed > game.settings().base_alien_speed);

    game.stats_mut().add_score(700);
    game.stats_mut().ships_left = 1;
    put_alien_on_ship(&mut game);
    game.update(Instant::now());

    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(game.stats().ships_left, 0);
    assert!(!game.is_paused());
    assert!(game.pointer_visible());
    assert!(game.aliens().is_empty());
    assert_eq!(game.stats().high_score, 700);

    let settings = game.settings();
    assert_eq!(settings.alien_speed, settings.base_alien_speed);
    assert_eq!(settings.ship_speed, settings.base_ship_speed);
    assert_eq!(settings.star_speed, settings.base_star_speed);
    assert!(
        game.take_events()
            .contains(&GameEvent::GameOver { score: 700 })
    );

    // The start key works again from the game-over screen
    game.handle_event(InputEvent::KeyDown(Key::Start));
    assert_eq!(game.mode(), GameMode::Active);
    assert_eq!(game.stats().score, 0);
    assert_eq!(game.stats().high_score, 700);
    assert_eq!(game.stats().ships_left, 3);
}

#[test]
fn test_game_over_records_high_score() {
    let mut game = started_game();
    game.stats_mut().add_score(900);
    game.stats_mut().ships_left = 1;
    put_alien_on_ship(&mut game);
    game.update(Instant::now());
    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(game.stats().high_score, 900);

    // A lower score leaves the record alone
    game.start_game();
    game.stats_mut().add_score(300);
    game.stats_mut().ships_left = 1;
    put_alien_on_ship(&mut game);
    game.update(Instant::now());
    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(game.stats().score, 300);
    assert_eq!(game.stats().high_score, 900);
}

#[test]
fn test_clearing_the_fleet_levels_up() {
    let mut game = started_game();
    let before = game.settings().clone();
    *game.fleet_mut() = Fleet::from_aliens(vec![Alien::new(10.0, 10.0)], FleetDirection::Right);
    game.bullets_mut().push(Bullet::new(11.0, 10.0, 1, 1, 0.0));
    game.bullets_mut().push(Bullet::new(60.0, 20.0, 1, 1, 0.0));

    game.update(Instant::now());

    let after = game.settings();
    assert_eq!(game.stats().level, 2);
    assert_eq!(game.stats().score, 50);
    assert!(approx(after.alien_speed, before.alien_speed * 1.1));
    assert!(approx(after.ship_speed, before.ship_speed * 1.1));
    assert!(approx(after.bullet_speed, before.bullet_speed * 1.1));
    assert!(approx(after.star_speed, before.star_speed * 1.1));
    assert!(approx(game.ship().speed(), after.ship_speed));
    assert!(game.bullets().is_empty());
    assert_eq!(game.aliens().len(), 36);
    assert!(game.take_events().contains(&GameEvent::LevelUp(2)));
}

#[test]
fn test_fleet_reaching_bottom_costs_a_ship() {
    let mut game = started_game();
    *game.fleet_mut() = Fleet::from_aliens(vec![Alien::new(10.0, 34.0)], FleetDirection::Right);

    game.update(Instant::now());

    assert_eq!(game.stats().ships_left, 2);
    assert!(game.is_paused());
}

#[test]
fn test_bullet_fires_from_moved_ship() {
    let mut game = started_game();
    let start_x = game.ship().body().x;
    game.handle_event(InputEvent::KeyDown(Key::Right));
    game.handle_event(InputEvent::KeyDown(Key::Fire));

    game.update(Instant::now());

    let ship = game.ship();
    assert!(ship.body().x > start_x);
    let bullet = &game.bullets()[0];
    assert!(approx(bullet.body().x, ship.body().center_x() - 0.5));
}

#[test]
fn test_zero_bullet_limit_never_fires() {
    let settings = Settings {
        max_live_bullets: 0,
        ..Settings::default()
    };
    let mut game = Game::with_seed(settings, 1);
    game.start_game();
    for _ in 0..10 {
        game.handle_event(InputEvent::KeyDown(Key::Fire));
        game.update(Instant::now());
        assert!(game.bullets().is_empty());
    }
    assert!(!game.take_events().contains(&GameEvent::Fired));
}

#[test]
fn test_new_wave_keeps_fleet_direction() {
    let mut game = started_game();
    // Walk the fleet into the right edge so it reverses
    for _ in 0..400 {
        game.update(Instant::now());
        if game.fleet().direction() == FleetDirection::Left {
            break;
        }
    }
    assert_eq!(game.fleet().direction(), FleetDirection::Left);

    // Level-up
    game.fleet_mut().clear();
    game.update(Instant::now());
    assert_eq!(game.stats().level, 2);
    assert_eq!(game.fleet().direction(), FleetDirection::Left);

    // Life loss
    let (x, y) = {
        let body = game.ship().body();
        (body.x, body.y)
    };
    *game.fleet_mut() = Fleet::from_aliens(vec![Alien::new(x, y - 1.0)], FleetDirection::Left);
    game.update(Instant::now());
    assert_eq!(game.stats().ships_left, 2);
    assert_eq!(game.fleet().direction(), FleetDirection::Left);

    // A new game starts from the configured direction again
    game.start_game();
    assert_eq!(game.fleet().direction(), game.settings().fleet_direction);
    assert_eq!(game.fleet().direction(), FleetDirection::Right);
}
