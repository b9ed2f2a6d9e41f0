use std::fs;

use alien_invasion::assets::Assets;
use alien_invasion::game::{
    Action, Bounds, Input, Invasion, Key, Movable, Phase, Renderer, SpriteId,
};
use alien_invasion::settings::{Rgb, Settings};

const MAX_FRAMES: usize = 20_000;

fn game(settings: Settings) -> Invasion {
    let assets = Assets::builtin().expect("built-in sprites should parse");
    Invasion::new(settings, assets.ship.size(), assets.alien.size())
}

/// A 300x400 screen holds exactly one 60x60 alien above a 50 px ship
fn single_alien_settings() -> Settings {
    Settings {
        screen_width: 300,
        screen_height: 400,
        window_width: 300,
        window_height: 400,
        alien_speed: 0.0,
        ..Settings::default()
    }
}

fn run_until(game: &mut Invasion, done: impl Fn(&Invasion) -> bool) -> usize {
    for frame in 0..MAX_FRAMES {
        if done(game) {
            return frame;
        }
        game.update();
    }
    panic!("condition not reached in {MAX_FRAMES} frames");
}

#[test]
fn unattended_session_loses_every_ship() {
    let mut game = game(Settings::default());
    game.handle_input(Input::KeyDown(Key::Start));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.fleet().len(), 36);

    let mut losses = Vec::new();
    let mut last = game.stats().ship_left;
    for _ in 0..MAX_FRAMES {
        game.update();
        let left = game.stats().ship_left;
        if left != last {
            losses.push(left);
            last = left;
            if left > 0 {
                assert_eq!(game.phase(), Phase::Recovering(60));
                assert_eq!(game.fleet().len(), 36);
                assert!(game.bullets().is_empty());
            }
        }
        if game.phase() == Phase::Inactive {
            break;
        }
    }

    assert_eq!(losses, vec![2, 1, 0]);
    assert_eq!(game.phase(), Phase::Inactive);
    assert!(game.fleet().is_empty());
    assert_eq!(game.stats().score, 0);
}

#[test]
fn shooting_the_last_alien_brings_a_new_wave() {
    let mut game = game(single_alien_settings());
    game.start();
    assert_eq!(game.fleet().len(), 1);
    assert_eq!(game.fleet().aliens()[0].bounds(), Bounds::new(60.0, 60.0, 60.0, 60.0));

    // Ship starts centred at x=120; slide under the alien
    game.handle_input(Input::KeyDown(Key::Left));
    for _ in 0..8 {
        game.update();
    }
    game.handle_input(Input::KeyUp(Key::Left));
    assert_eq!(game.ship().bounds().x, 72.0);

    game.handle_input(Input::KeyDown(Key::Fire));
    assert_eq!(game.bullets().len(), 1);
    for _ in 0..40 {
        game.update();
    }

    let stats = game.stats();
    assert_eq!(stats.score, 50);
    assert_eq!(stats.high_score, 50);
    assert_eq!(stats.level, 1);
    assert_eq!(game.fleet().len(), 1);
    assert!(game.bullets().is_empty());
}

#[test]
fn bullet_cap_limits_live_bullets() {
    let mut game = game(single_alien_settings());
    game.start();
    for _ in 0..5 {
        game.handle_input(Input::KeyDown(Key::Fire));
    }
    assert_eq!(game.bullets().len(), 3);

    // Missed bullets leave the top and free their slots
    for _ in 0..60 {
        game.update();
    }
    assert!(game.bullets().is_empty());
    assert!(game.fire_bullet());
}

#[test]
fn recovery_pause_keeps_quit_live() {
    let mut game = game(Settings {
        alien_drop_speed: 200.0,
        ..Settings::default()
    });
    game.start();
    run_until(&mut game, |g| matches!(g.phase(), Phase::Recovering(_)));
    assert_eq!(game.stats().ship_left, 2);

    let ship = game.ship().bounds();
    assert_eq!(game.handle_input(Input::KeyDown(Key::Fire)), Action::None);
    assert!(game.bullets().is_empty());
    game.handle_input(Input::KeyDown(Key::Right));
    for _ in 0..59 {
        game.update();
        assert!(matches!(game.phase(), Phase::Recovering(_)));
    }
    assert_eq!(game.ship().bounds(), ship);
    assert_eq!(game.handle_input(Input::KeyDown(Key::ToggleView)), Action::ToggleFullscreen);
    assert_eq!(game.handle_input(Input::Quit), Action::Quit);
    assert_eq!(game.handle_input(Input::KeyDown(Key::Quit)), Action::Quit);

    game.update();
    assert_eq!(game.phase(), Phase::Active);
    game.update();
    assert!(game.ship().bounds().x > ship.x);
}

#[test]
fn settings_file_drives_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "ship_limit": 1, "alien_drop_speed": 200.0 }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.ship_limit, 1);
    assert_eq!(settings.bullet_allowed, 3);

    let mut game = game(settings);
    game.start();
    assert_eq!(game.stats().ship_left, 1);
    run_until(&mut game, |g| g.phase() != Phase::Active);
    assert_eq!(game.phase(), Phase::Inactive);
    assert_eq!(game.stats().ship_left, 0);
    assert!(game.fleet().is_empty());

    // A new session starts over with a full fleet
    game.handle_input(Input::KeyDown(Key::Start));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.stats().ship_left, 1);
    assert_eq!(game.fleet().len(), 36);
}

#[derive(Default)]
struct TextLog {
    texts: Vec<String>,
    sprites: usize,
}

impl Renderer for TextLog {
    fn fill_background(&mut self, _color: Rgb) {}

    fn draw_sprite(&mut self, _sprite: SpriteId, _x: f32, _y: f32) {
        self.sprites += 1;
    }

    fn draw_rect(&mut self, _rect: Bounds, _color: Rgb) {}

    fn draw_text(&mut self, text: &str, _area: Bounds, _color: Rgb) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn play_button_drawn_only_while_inactive() {
    let mut game = game(Settings::default());
    let mut log = TextLog::default();
    game.draw(&mut log);
    assert!(log.texts.iter().any(|t| t == "Play"));
    assert!(log.texts.iter().any(|t| t == "Ships: 3"));
    assert_eq!(log.sprites, 37);

    let button = game.play_button().bounds;
    game.handle_input(Input::MouseDown {
        x: button.center_x(),
        y: button.y + button.height / 2.0,
    });
    let mut log = TextLog::default();
    game.draw(&mut log);
    assert!(!log.texts.iter().any(|t| t == "Play"));
    assert!(log.texts.iter().any(|t| t == "Score: 0"));
    assert!(log.texts.iter().any(|t| t == "Level: 1"));
}
