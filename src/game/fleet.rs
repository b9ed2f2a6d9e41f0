use crate::game::entity::{Alien, Bullet, Movable};
use crate::game::geometry::{Bounds, Size};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Fleet {
    aliens: Vec<Alien>,
    alien_size: Size,
}

/// Columns and rows of a fresh fleet. Zero in either direction when the
/// screen is too small, including for zero-sized sprites.
pub fn grid_dimensions(settings: &Settings, alien: Size, ship_height: f32) -> (usize, usize) {
    if alien.width <= 0.0 || alien.height <= 0.0 {
        return (0, 0);
    }
    let available_x = settings.screen_width as f32 - 2.0 * alien.width;
    let available_y = settings.screen_height as f32 - ship_height - 3.0 * alien.height;
    let cols = (available_x / (2.0 * alien.width)).floor().max(0.0);
    let rows = (available_y / (2.0 * alien.height)).floor().max(0.0);
    (cols as usize, rows as usize)
}

impl Fleet {
    pub fn new(alien_size: Size) -> Self {
        Self {
            aliens: Vec::new(),
            alien_size,
        }
    }

    /// Replace the fleet with a full grid; returns the alien count
    pub fn create(&mut self, settings: &Settings, ship_height: f32) -> usize {
        self.aliens.clear();
        let (cols, rows) = grid_dimensions(settings, self.alien_size, ship_height);
        if cols == 0 || rows == 0 {
            log::warn!(
                "Screen {}x{} fits no aliens ({} cols, {} rows); fleet is empty",
                settings.screen_width,
                settings.screen_height,
                cols,
                rows
            );
            return 0;
        }

        let w = self.alien_size.width;
        let h = self.alien_size.height;
        for row in 0..rows {
            for col in 0..cols {
                let x = w + col as f32 * 2.0 * w;
                let y = h + row as f32 * 2.0 * h;
                self.aliens.push(Alien::new(x, y, self.alien_size));
            }
        }
        log::debug!("Fleet created: {} cols x {} rows", cols, rows);
        self.aliens.len()
    }

    /// True if any alien touches or crosses a side of the screen
    pub fn check_edges(&self, screen_width: f32) -> bool {
        self.aliens.iter().any(|alien| {
            let b = alien.bounds();
            b.right() >= screen_width || b.left() <= 0.0
        })
    }

    /// Drop the whole fleet one step and reverse its heading
    pub fn change_direction(&mut self, settings: &mut Settings) {
        for alien in &mut self.aliens {
            alien.drop_by(settings.alien_drop_speed);
        }
        settings.reverse_fleet();
    }

    /// Move every alien sideways along the current heading
    pub fn update(&mut self, settings: &Settings) {
        for alien in &mut self.aliens {
            alien.update(settings);
        }
    }

    /// Resolve bullet hits. Each bullet in turn destroys every alien it
    /// overlaps and is itself consumed; returns the number of aliens lost.
    pub fn remove_hit_by(&mut self, bullets: &mut Vec<Bullet>) -> usize {
        let before = self.aliens.len();
        bullets.retain(|bullet| {
            let shot = bullet.bounds();
            let alive = self.aliens.len();
            self.aliens.retain(|alien| !alien.bounds().intersects(&shot));
            self.aliens.len() == alive
        });
        before - self.aliens.len()
    }

    pub fn collides_with(&self, target: &Bounds) -> bool {
        self.aliens.iter().any(|alien| alien.bounds().intersects(target))
    }

    /// True if any alien reached the bottom of the screen
    pub fn reached_bottom(&self, screen_height: f32) -> bool {
        self.aliens
            .iter()
            .any(|alien| alien.bounds().bottom() >= screen_height)
    }

    pub fn clear(&mut self) {
        self.aliens.clear();
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, alien: Alien) {
        self.aliens.push(alien);
    }
}
