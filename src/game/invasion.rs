use crate::game::button::Button;
use crate::game::entity::{Bullet, Movable, Ship};
use crate::game::fleet::Fleet;
use crate::game::geometry::{Bounds, Size};
use crate::game::render::{Renderer, SpriteId};
use crate::game::stats::GameStats;
use crate::settings::Settings;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
    ToggleView,
    Start,
    Other,
}

/// One input event, in the order the host received it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Left click, in virtual screen pixels
    MouseDown { x: f32, y: f32 },
}

/// Requests the game makes of its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the play button
    Inactive,
    Active,
    /// Holding still after a lost ship, frames remaining
    Recovering(u32),
}

pub struct Invasion {
    settings: Settings,
    stats: GameStats,
    ship: Ship,
    fleet: Fleet,
    bullets: Vec<Bullet>,
    play_button: Button,
    recovery_frames: u32,
    frame: u64,
}

impl Invasion {
    /// A new game sitting on the play screen, with a fleet on display
    pub fn new(settings: Settings, ship_size: Size, alien_size: Size) -> Self {
        let stats = GameStats::new(&settings);
        let ship = Ship::new(ship_size, &settings);
        let mut fleet = Fleet::new(alien_size);
        fleet.create(&settings, ship_size.height);
        let play_button = Button::new(&settings, "Play");
        Self {
            settings,
            stats,
            ship,
            fleet,
            bullets: Vec::new(),
            play_button,
            recovery_frames: 0,
            frame: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.stats.game_active {
            Phase::Inactive
        } else if self.recovery_frames > 0 {
            Phase::Recovering(self.recovery_frames)
        } else {
            Phase::Active
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, input: Input) -> Action {
        match input {
            Input::Quit => Action::Quit,
            Input::KeyDown(key) => self.key_down(key),
            Input::KeyUp(key) => {
                match key {
                    Key::Left => self.ship.moving_left = false,
                    Key::Right => self.ship.moving_right = false,
                    _ => {}
                }
                Action::None
            }
            Input::MouseDown { x, y } => {
                if !self.stats.game_active && self.play_button.contains(x, y) {
                    self.start();
                }
                Action::None
            }
        }
    }

    fn key_down(&mut self, key: Key) -> Action {
        match key {
            Key::Left => self.ship.moving_left = true,
            Key::Right => self.ship.moving_right = true,
            Key::Fire => {
                self.fire_bullet();
            }
            Key::Quit => return Action::Quit,
            Key::ToggleView => return Action::ToggleFullscreen,
            Key::Start => {
                if !self.stats.game_active {
                    self.start();
                }
            }
            Key::Other => {}
        }
        Action::None
    }

    /// Begin a fresh session. Does nothing while one is running.
    pub fn start(&mut self) {
        if self.stats.game_active {
            return;
        }
        self.stats.reset(&self.settings);
        self.stats.game_active = true;
        self.recovery_frames = 0;
        self.bullets.clear();
        self.fleet.create(&self.settings, self.ship.size().height);
        self.ship.center(&self.settings);
        log::info!(
            "Session started: {} ships, {} aliens",
            self.stats.ship_left,
            self.fleet.len()
        );
    }

    /// Fire if the game is live and the bullet cap allows; returns whether
    /// a bullet was created.
    pub fn fire_bullet(&mut self) -> bool {
        if self.phase() != Phase::Active || self.bullets.len() >= self.settings.bullet_allowed {
            return false;
        }
        self.bullets.push(Bullet::fired_from(&self.ship, &self.settings));
        true
    }

    /// Apply a new playfield size from the host's display mode
    pub fn resize(&mut self, width: u32, height: u32, full_screen: bool) {
        self.settings.screen_width = width;
        self.settings.screen_height = height;
        self.settings.full_screen = full_screen;
        self.ship.fit_to_screen(&self.settings);
        self.play_button.recenter(&self.settings);

        // A fleet laid out for the old size can sit past the new edges
        self.bullets.clear();
        self.fleet.create(&self.settings, self.ship.size().height);
        log::info!(
            "Screen is now {}x{} ({})",
            width,
            height,
            if full_screen { "full screen" } else { "windowed" }
        );
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    /// Advance one frame
    pub fn update(&mut self) {
        if !self.stats.game_active {
            return;
        }
        if self.recovery_frames > 0 {
            self.recovery_frames -= 1;
            return;
        }
        self.frame += 1;
        self.ship.update(&self.settings);
        self.update_bullets();
        self.update_fleet();
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        self.bullets.retain(|b| !b.is_spent());

        let destroyed = self.fleet.remove_hit_by(&mut self.bullets);
        if destroyed > 0 {
            let points = self.settings.alien_points.saturating_mul(destroyed as u32);
            if self.stats.add_points(points) {
                log::debug!("New high score: {}", self.stats.high_score);
            }
        }

        if self.fleet.is_empty() {
            // Next wave at the same strength
            self.bullets.clear();
            let count = self.fleet.create(&self.settings, self.ship.size().height);
            if destroyed > 0 {
                log::info!("Fleet destroyed at frame {}; new wave of {}", self.frame, count);
            }
        }
    }

    fn update_fleet(&mut self) {
        let screen = self.settings.screen_bounds();
        if self.fleet.check_edges(screen.right()) {
            self.fleet.change_direction(&mut self.settings);
        }
        self.fleet.update(&self.settings);

        if self.fleet.collides_with(&self.ship.bounds()) {
            log::info!("Ship hit by an alien at frame {}", self.frame);
            self.ship_hit();
        } else if self.fleet.reached_bottom(screen.bottom()) {
            log::info!("Aliens reached the bottom at frame {}", self.frame);
            self.ship_hit();
        }
    }

    fn ship_hit(&mut self) {
        let remaining = self.stats.lose_ship();
        self.bullets.clear();
        self.fleet.clear();

        if remaining == 0 {
            log::info!(
                "Game over: score {}, high score {}",
                self.stats.score,
                self.stats.high_score
            );
            return;
        }

        self.fleet.create(&self.settings, self.ship.size().height);
        self.ship.center(&self.settings);
        self.recovery_frames = self.settings.hit_pause_frames;
        log::info!("{} ships left", remaining);
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.fill_background(self.settings.bg_color);

        let ship = self.ship.bounds();
        renderer.draw_sprite(SpriteId::Ship, ship.x, ship.y);
        for bullet in &self.bullets {
            renderer.draw_rect(bullet.bounds(), self.settings.bullet_color);
        }
        for alien in self.fleet.aliens() {
            let b = alien.bounds();
            renderer.draw_sprite(SpriteId::Alien, b.x, b.y);
        }

        self.draw_scoreboard(renderer);

        if !self.stats.game_active {
            let button = &self.play_button;
            renderer.draw_rect(button.bounds, button.color);
            renderer.draw_text(&button.label, button.bounds, button.text_color);
        }
    }

    fn draw_scoreboard(&self, renderer: &mut impl Renderer) {
        let width = self.settings.screen_width as f32;
        let color = self.settings.text_color;
        let line = 30.0;

        renderer.draw_text(
            &format!("Ships: {}", self.stats.ship_left),
            Bounds::new(20.0, 20.0, 200.0, line),
            color,
        );
        renderer.draw_text(
            &format!("High: {}", self.stats.high_score),
            Bounds::new(width / 2.0 - 100.0, 20.0, 200.0, line),
            color,
        );
        renderer.draw_text(
            &format!("Score: {}", self.stats.score),
            Bounds::new(width - 220.0, 20.0, 200.0, line),
            color,
        );
        renderer.draw_text(
            &format!("Level: {}", self.stats.level),
            Bounds::new(width - 220.0, 20.0 + line, 200.0, line),
            color,
        );
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn play_button(&self) -> &Button {
        &self.play_button
    }

    #[cfg(test)]
    pub(crate) fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    #[cfg(test)]
    pub(crate) fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }
}
