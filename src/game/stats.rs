use crate::settings::Settings;

/// Session statistics. `high_score` survives every reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub ship_left: u32,
    pub score: u32,
    pub level: u32,
    pub game_active: bool,
    pub high_score: u32,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = Self {
            ship_left: 0,
            score: 0,
            level: 1,
            game_active: false,
            high_score: 0,
        };
        stats.reset(settings);
        stats
    }

    pub fn reset(&mut self, settings: &Settings) {
        self.ship_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Add points; returns true when this sets a new high score
    pub fn add_points(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Spend one ship. Running out ends the session.
    pub fn lose_ship(&mut self) -> u32 {
        self.ship_left = self.ship_left.saturating_sub(1);
        if self.ship_left == 0 {
            self.game_active = false;
        }
        self.ship_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_inactive_with_full_ships() {
        let settings = Settings::default();
        let stats = GameStats::new(&settings);
        assert!(!stats.game_active);
        assert_eq!(stats.ship_left, settings.ship_limit);
        assert_eq!((stats.score, stats.level, stats.high_score), (0, 1, 0));
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let settings = Settings::default();
        let mut stats = GameStats::new(&settings);
        stats.add_points(300);
        stats.level = 4;
        stats.ship_left = 1;

        stats.reset(&settings);
        assert_eq!((stats.score, stats.level), (0, 1));
        assert_eq!(stats.ship_left, settings.ship_limit);
        assert_eq!(stats.high_score, 300);
    }

    #[test]
    fn test_high_score_only_on_improvement() {
        let settings = Settings::default();
        let mut stats = GameStats::new(&settings);
        assert!(stats.add_points(100));
        stats.reset(&settings);
        assert!(!stats.add_points(50));
        assert!(!stats.add_points(50));
        assert!(stats.add_points(50));
        assert_eq!(stats.high_score, 150);
    }

    #[test]
    fn test_last_ship_ends_session() {
        let settings = Settings::default();
        let mut stats = GameStats::new(&settings);
        stats.game_active = true;
        stats.ship_left = 2;

        assert_eq!(stats.lose_ship(), 1);
        assert!(stats.game_active);
        assert_eq!(stats.lose_ship(), 0);
        assert!(!stats.game_active);
        assert_eq!(stats.lose_ship(), 0);
    }
}
