use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::game::geometry::Size;
use crate::game::render::SpriteId;
use crate::settings::Rgb;

/// Virtual pixels per art pixel, on each axis
pub const ART_PIXEL: f32 = 5.0;

const DEFAULT_COLOR: Rgb = Rgb(60, 60, 60);

const BUILTIN_SHIP: &str = include_str!("../assets/ship.txt");
const BUILTIN_ALIEN: &str = include_str!("../assets/alien.txt");

/// A bitmap read from text: an optional `color R G B` line, then one row of
/// art per line, `#` filled and `.` or space empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub color: Rgb,
    cols: usize,
    rows: usize,
    pixels: Vec<Vec<bool>>,
}

impl Sprite {
    pub fn parse(text: &str) -> Result<Self> {
        let mut color = DEFAULT_COLOR;
        let mut pixels: Vec<Vec<bool>> = Vec::new();

        for (n, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if let Some(rest) = line.strip_prefix("color") {
                if !pixels.is_empty() {
                    bail!("line {}: color must come before the art", n + 1);
                }
                color = parse_color(rest).with_context(|| format!("line {}", n + 1))?;
                continue;
            }
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                match ch {
                    '#' => row.push(true),
                    '.' | ' ' => row.push(false),
                    other => bail!("line {}: unexpected character {:?}", n + 1, other),
                }
            }
            pixels.push(row);
        }

        // Trailing blank lines are not part of the art
        while pixels.last().is_some_and(|row| row.is_empty()) {
            pixels.pop();
        }
        let cols = pixels.iter().map(Vec::len).max().unwrap_or(0);
        if cols == 0 {
            bail!("sprite has no pixels");
        }
        for row in &mut pixels {
            row.resize(cols, false);
        }

        Ok(Self {
            color,
            cols,
            rows: pixels.len(),
            pixels,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed reading sprite {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid sprite {}", path.display()))
    }

    /// Intrinsic size in virtual pixels
    pub fn size(&self) -> Size {
        Size::new(self.cols as f32 * ART_PIXEL, self.rows as f32 * ART_PIXEL)
    }

    /// Art pixel under a point given as a fraction of the sprite (0..1)
    pub fn sample(&self, u: f32, v: f32) -> bool {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return false;
        }
        let col = ((u * self.cols as f32) as usize).min(self.cols - 1);
        let row = ((v * self.rows as f32) as usize).min(self.rows - 1);
        self.pixels[row][col]
    }
}

fn parse_color(rest: &str) -> Result<Rgb> {
    let parts: Vec<u8> = rest
        .split_whitespace()
        .map(|p| p.parse::<u8>().map_err(|e| anyhow!("bad colour component {p:?}: {e}")))
        .collect::<Result<_>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok(Rgb(*r, *g, *b)),
        _ => bail!("colour needs three components, got {}", parts.len()),
    }
}

/// Every sprite the game draws
#[derive(Debug, Clone)]
pub struct Assets {
    pub ship: Sprite,
    pub alien: Sprite,
}

impl Assets {
    /// Sprites compiled into the binary
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            ship: Sprite::parse(BUILTIN_SHIP).context("built-in ship sprite")?,
            alien: Sprite::parse(BUILTIN_ALIEN).context("built-in alien sprite")?,
        })
    }

    /// Load `ship.txt` and `alien.txt` from a directory
    pub fn load(dir: &Path) -> Result<Self> {
        let assets = Self {
            ship: Sprite::load(&dir.join("ship.txt"))?,
            alien: Sprite::load(&dir.join("alien.txt"))?,
        };
        log::info!("Loaded sprites from {}", dir.display());
        Ok(assets)
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::Ship => &self.ship,
            SpriteId::Alien => &self.alien,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_and_color() {
        let sprite = Sprite::parse("color 1 2 3\n.#.\n###\n").unwrap();
        assert_eq!(sprite.color, Rgb(1, 2, 3));
        assert_eq!(sprite.size(), Size::new(15.0, 10.0));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let sprite = Sprite::parse("#\n###\n").unwrap();
        assert_eq!(sprite.size(), Size::new(15.0, 10.0));
        assert!(sprite.sample(0.1, 0.1));
        assert!(!sprite.sample(0.9, 0.1));
        assert!(sprite.sample(0.9, 0.9));
    }

    #[test]
    fn test_sample_outside_is_empty() {
        let sprite = Sprite::parse("##\n##").unwrap();
        assert!(sprite.sample(0.0, 0.0));
        assert!(!sprite.sample(1.0, 0.5));
        assert!(!sprite.sample(-0.1, 0.5));
    }

    #[test]
    fn test_rejects_bad_art() {
        assert!(Sprite::parse("").is_err());
        assert!(Sprite::parse("color 1 2 3\n").is_err());
        assert!(Sprite::parse("#x#").is_err());
        assert!(Sprite::parse("color 1 2\n#").is_err());
        assert!(Sprite::parse("color 1 2 300\n#").is_err());
        assert!(Sprite::parse("#\ncolor 1 2 3").is_err());
    }

    #[test]
    fn test_builtin_sizes() {
        let assets = Assets::builtin().unwrap();
        assert_eq!(assets.get(SpriteId::Ship).size(), Size::new(60.0, 50.0));
        assert_eq!(assets.get(SpriteId::Alien).size(), Size::new(60.0, 60.0));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Assets::load(dir.path()).is_err());

        fs::write(dir.path().join("ship.txt"), "###\n").unwrap();
        assert!(Assets::load(dir.path()).is_err());

        fs::write(dir.path().join("alien.txt"), "#\n#\n").unwrap();
        let assets = Assets::load(dir.path()).unwrap();
        assert_eq!(assets.ship.size(), Size::new(15.0, 5.0));
        assert_eq!(assets.alien.size(), Size::new(5.0, 10.0));
    }
}
