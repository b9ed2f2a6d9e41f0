pub mod button;
pub mod entity;
pub mod fleet;
pub mod geometry;
pub mod invasion;
pub mod render;
pub mod stats;

pub use entity::{Alien, Bullet, Movable, Ship};
pub use fleet::{grid_dimensions, Fleet};
pub use geometry::{Bounds, Size};
pub use invasion::{Action, Input, Invasion, Key, Phase};
pub use render::{Renderer, SpriteId};
pub use stats::GameStats;
