use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::geometry::Bounds;

/// An RGB colour, written as `[r, g, b]` in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Horizontal heading of the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FleetDirection {
    #[default]
    Right,
    Left,
}

impl FleetDirection {
    /// +1.0 for right, -1.0 for left
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Current playfield size in virtual pixels
    pub screen_width: u32,
    pub screen_height: u32,
    /// Size restored when leaving full screen
    pub window_width: u32,
    pub window_height: u32,
    pub full_screen: bool,
    pub bg_color: Rgb,
    pub text_color: Rgb,

    // === Ship ===
    pub ship_speed: f32,
    pub ship_limit: u32,
    /// Frames the game holds still after the ship is hit
    pub hit_pause_frames: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_color: Rgb,
    pub bullet_allowed: usize,

    // === Aliens ===
    pub alien_speed: f32,
    pub alien_drop_speed: f32,
    pub alien_points: u32,
    /// Runtime state, never read from a settings file
    #[serde(skip)]
    pub fleet_direction: FleetDirection,

    // === Play button ===
    pub button_width: f32,
    pub button_height: f32,
    pub button_color: Rgb,
    pub button_text_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1200,
            screen_height: 800,
            window_width: 1200,
            window_height: 800,
            full_screen: false,
            bg_color: Rgb(230, 230, 230),
            text_color: Rgb(30, 30, 30),

            ship_speed: 6.0,
            ship_limit: 3,
            hit_pause_frames: 60,

            bullet_speed: 9.0,
            bullet_width: 5.0,
            bullet_height: 20.0,
            bullet_color: Rgb(60, 60, 60),
            bullet_allowed: 3,

            alien_speed: 2.0,
            alien_drop_speed: 20.0,
            alien_points: 50,
            fleet_direction: FleetDirection::Right,

            button_width: 200.0,
            button_height: 50.0,
            button_color: Rgb(0, 200, 0),
            button_text_color: Rgb(255, 255, 255),
        }
    }
}

impl Settings {
    /// Read a JSON settings file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading settings {}", path.display()))?;
        let mut settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        settings.validate()
            .with_context(|| format!("rejected settings file {}", path.display()))?;

        // A file only describes the windowed layout
        settings.screen_width = settings.window_width;
        settings.screen_height = settings.window_height;
        settings.full_screen = false;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with. Degenerate fleet
    /// geometry is not checked here; an empty fleet is a legal state.
    pub fn validate(&self) -> Result<()> {
        let speeds = [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("alien_speed", self.alien_speed),
            ("alien_drop_speed", self.alien_drop_speed),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a finite, non-negative number (got {value})");
            }
        }
        if self.ship_limit == 0 {
            bail!("ship_limit must be at least 1");
        }
        if self.window_width == 0 || self.window_height == 0 {
            bail!(
                "window size must be non-zero (got {}x{})",
                self.window_width,
                self.window_height
            );
        }
        Ok(())
    }

    /// The playfield as a rectangle anchored at the origin
    pub fn screen_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.screen_width as f32, self.screen_height as f32)
    }

    pub fn reverse_fleet(&mut self) {
        self.fleet_direction = self.fleet_direction.reversed();
    }
}
