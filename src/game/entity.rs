use crate::game::geometry::{Bounds, Size};
use crate::settings::Settings;

/// Shared per-frame behaviour of everything that moves on screen
pub trait Movable {
    /// Advance one frame
    fn update(&mut self, settings: &Settings);
    fn bounds(&self) -> Bounds;
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Ship {
    x: f32,
    y: f32,
    size: Size,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship centred at the bottom of the screen
    pub fn new(size: Size, settings: &Settings) -> Self {
        let mut ship = Self {
            x: 0.0,
            y: 0.0,
            size,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    pub fn center(&mut self, settings: &Settings) {
        self.x = max_x(self.size, settings) / 2.0;
        self.y = settings.screen_height as f32 - self.size.height;
    }

    /// Keep the ship on screen after the playfield changes size
    pub fn fit_to_screen(&mut self, settings: &Settings) {
        self.x = self.x.clamp(0.0, max_x(self.size, settings));
        self.y = settings.screen_height as f32 - self.size.height;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Top-centre point, where bullets leave the ship
    pub fn nose(&self) -> (f32, f32) {
        (self.x + self.size.width / 2.0, self.y)
    }
}

fn max_x(size: Size, settings: &Settings) -> f32 {
    (settings.screen_width as f32 - size.width).max(0.0)
}

impl Movable for Ship {
    fn update(&mut self, settings: &Settings) {
        if self.moving_right {
            self.x += settings.ship_speed;
        }
        if self.moving_left {
            self.x -= settings.ship_speed;
        }
        self.x = self.x.clamp(0.0, max_x(self.size, settings));
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, self.size)
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    x: f32,
    y: f32,
    size: Size,
}

impl Alien {
    pub fn new(x: f32, y: f32, size: Size) -> Self {
        Self { x, y, size }
    }

    pub fn drop_by(&mut self, distance: f32) {
        self.y += distance;
    }
}

impl Movable for Alien {
    fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed * settings.fleet_direction.sign();
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, self.size)
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    x: f32,
    y: f32,
    size: Size,
}

impl Bullet {
    /// A bullet whose top-centre sits on the ship's nose
    pub fn fired_from(ship: &Ship, settings: &Settings) -> Self {
        let (nose_x, nose_y) = ship.nose();
        Self {
            x: nose_x - settings.bullet_width / 2.0,
            y: nose_y,
            size: Size::new(settings.bullet_width, settings.bullet_height),
        }
    }

    /// True once the bullet has fully left the top of the screen
    pub fn is_spent(&self) -> bool {
        self.bounds().bottom() <= 0.0
    }
}

impl Movable for Bullet {
    fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed;
    }

    fn bounds(&self) -> Bounds {
        Bounds::at(self.x, self.y, self.size)
    }
}
