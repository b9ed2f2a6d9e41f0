use crate::game::geometry::Bounds;
use crate::settings::Rgb;

/// Bitmaps the simulation asks the host to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Ship,
    Alien,
}

/// Drawing primitives, all in virtual screen pixels
pub trait Renderer {
    fn fill_background(&mut self, color: Rgb);
    /// Draw a sprite with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32);
    fn draw_rect(&mut self, rect: Bounds, color: Rgb);
    /// Draw a single line of text centred in `area`
    fn draw_text(&mut self, text: &str, area: Bounds, color: Rgb);
}
