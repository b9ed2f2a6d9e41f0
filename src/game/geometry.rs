/// Width and height of a sprite or entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn at(x: f32, y: f32, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// A rectangle of `size` centred inside `self`
    pub fn centered(&self, size: Size) -> Self {
        Self::new(
            self.x + (self.width - size.width) / 2.0,
            self.y + (self.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Overlap test. Rectangles that only share an edge do not collide,
    /// and an empty rectangle never collides with anything.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point containment, inclusive of the top-left edges only
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Bounds::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Bounds::new(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.intersects(&Bounds::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Bounds::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Bounds::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_empty_never_collides() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Bounds::new(5.0, 5.0, 0.0, 3.0)));
    }

    #[test]
    fn test_contains_half_open() {
        let a = Bounds::new(10.0, 10.0, 20.0, 10.0);
        assert!(a.contains(10.0, 10.0));
        assert!(a.contains(29.9, 19.9));
        assert!(!a.contains(30.0, 15.0));
        assert!(!a.contains(15.0, 20.0));
    }

    #[test]
    fn test_centered() {
        let screen = Bounds::new(0.0, 0.0, 1200.0, 800.0);
        let b = screen.centered(Size::new(200.0, 50.0));
        assert_eq!(b, Bounds::new(500.0, 375.0, 200.0, 50.0));
    }
}
