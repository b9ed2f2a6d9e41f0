use crate::game::geometry::{Bounds, Size};
use crate::settings::{Rgb, Settings};

/// The clickable play control shown while no session is running
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub bounds: Bounds,
    pub label: String,
    pub color: Rgb,
    pub text_color: Rgb,
}

impl Button {
    pub fn new(settings: &Settings, label: &str) -> Self {
        let mut button = Self {
            bounds: Bounds::default(),
            label: label.to_string(),
            color: settings.button_color,
            text_color: settings.button_text_color,
        };
        button.recenter(settings);
        button
    }

    pub fn recenter(&mut self, settings: &Settings) {
        let size = Size::new(settings.button_width, settings.button_height);
        self.bounds = settings.screen_bounds().centered(size);
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_follows_screen_center() {
        let mut settings = Settings::default();
        let mut button = Button::new(&settings, "Play");
        assert!(button.contains(600.0, 400.0));
        assert!(!button.contains(10.0, 10.0));

        settings.screen_width = 2000;
        settings.screen_height = 1000;
        button.recenter(&settings);
        assert!(button.contains(1000.0, 500.0));
        assert!(!button.contains(600.0, 400.0));
    }
}
