use std::collections::HashMap;

use ratatui::layout::Position;
use ratatui::prelude::*;

use crate::assets::Assets;
use crate::game::geometry::Bounds;
use crate::game::render::{Renderer, SpriteId};
use crate::settings::Rgb;

/// Virtual pixels per terminal cell in full screen mode
pub const CELL_WIDTH_PX: u32 = 10;
pub const CELL_HEIGHT_PX: u32 = 20;

/// Playfield size that fills a terminal of `cols` x `rows` cells
pub fn fullscreen_size(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * CELL_WIDTH_PX, rows as u32 * CELL_HEIGHT_PX)
}

/// Terminal cells a windowed playfield would like to occupy
pub fn window_cells(screen_width: u32, screen_height: u32) -> (u16, u16) {
    let cols = screen_width.div_ceil(CELL_WIDTH_PX).min(u16::MAX as u32);
    let rows = screen_height.div_ceil(CELL_HEIGHT_PX).min(u16::MAX as u32);
    (cols as u16, rows as u16)
}

pub fn tui_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Viewport {
    pub fn new(area: Rect, screen_width: u32, screen_height: u32) -> Self {
        Self {
            area,
            screen_width: (screen_width as f32).max(1.0),
            screen_height: (screen_height as f32).max(1.0),
        }
    }

    fn dots_w(&self) -> f32 {
        self.area.width as f32 * 2.0
    }

    fn dots_h(&self) -> f32 {
        self.area.height as f32 * 4.0
    }

    /// Dot containing a virtual point, relative to the area
    pub fn to_dot(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.screen_width * self.dots_w()).floor() as i32,
            (y / self.screen_height * self.dots_h()).floor() as i32,
        )
    }

    /// Centre of a dot, in virtual pixels
    fn dot_center(&self, bx: i32, by: i32) -> (f32, f32) {
        (
            (bx as f32 + 0.5) * self.screen_width / self.dots_w(),
            (by as f32 + 0.5) * self.screen_height / self.dots_h(),
        )
    }

    /// Map an absolute terminal cell (e.g. a mouse click) to the virtual
    /// point at its centre. `None` outside the area.
    pub fn cell_to_screen(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        if !self.area.contains(Position::new(col, row)) {
            return None;
        }
        let cx = (col - self.area.x) as f32 + 0.5;
        let cy = (row - self.area.y) as f32 + 0.5;
        Some((
            cx / self.area.width as f32 * self.screen_width,
            cy / self.area.height as f32 * self.screen_height,
        ))
    }
}

// ── Braille helpers ───────────────────────────────────────────────────────────

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn braille_bits(ch: char) -> u8 {
    match ch as u32 {
        code @ 0x2800..=0x28FF => (code - 0x2800) as u8,
        _ => 0,
    }
}

type DotMap = HashMap<(usize, usize), u8>;

pub struct BrailleCanvas<'a> {
    assets: &'a Assets,
    viewport: Viewport,
    background: Color,
    grid: Vec<Vec<(char, Style)>>,
}

impl<'a> BrailleCanvas<'a> {
    pub fn new(assets: &'a Assets, viewport: Viewport) -> Self {
        let w = viewport.area.width as usize;
        let h = viewport.area.height as usize;
        let background = Color::Reset;
        Self {
            assets,
            viewport,
            background,
            grid: vec![vec![(' ', Style::default().bg(background)); w]; h],
        }
    }

    fn set_dot(&self, map: &mut DotMap, bx: i32, by: i32) {
        let bw = self.viewport.area.width as i32 * 2;
        let bh = self.viewport.area.height as i32 * 4;
        if bx < 0 || by < 0 || bx >= bw || by >= bh {
            return;
        }
        let cx = bx as usize / 2;
        let cy = by as usize / 4;
        *map.entry((cx, cy)).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
    }

    /// Merge a dot layer into the grid. Dots already in a cell are kept and
    /// the cell takes the newest colour; cell backgrounds are preserved.
    fn write_layer(&mut self, map: &DotMap, color: Color) {
        for (&(cx, cy), &bits) in map {
            let Some(cell) = self.grid.get_mut(cy).and_then(|row| row.get_mut(cx)) else {
                continue;
            };
            let merged = braille_bits(cell.0) | bits;
            let ch = char::from_u32(0x2800 + merged as u32).unwrap_or(' ');
            *cell = (ch, cell.1.fg(color));
        }
    }

    /// Cell range covered by a virtual rectangle, clipped to the grid
    fn cell_span(&self, rect: Bounds) -> (usize, usize, usize, usize) {
        let (x0, y0) = self.viewport.to_dot(rect.left(), rect.top());
        let (x1, y1) = self.viewport.to_dot(rect.right(), rect.bottom());
        let w = self.viewport.area.width as i32;
        let h = self.viewport.area.height as i32;
        let clip = |v: i32, max: i32| v.clamp(0, max) as usize;
        (
            clip(x0.div_euclid(2), w),
            clip(y0.div_euclid(4), h),
            clip(x1.div_euclid(2), w),
            clip(y1.div_euclid(4), h),
        )
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Style)> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Renderer for BrailleCanvas<'_> {
    fn fill_background(&mut self, color: Rgb) {
        self.background = tui_color(color);
        let style = Style::default().bg(self.background);
        for row in &mut self.grid {
            for cell in row.iter_mut() {
                *cell = (' ', style);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32) {
        let assets = self.assets;
        let image = assets.get(sprite);
        let size = image.size();
        let (x0, y0) = self.viewport.to_dot(x, y);
        let (x1, y1) = self.viewport.to_dot(x + size.width, y + size.height);

        let mut map = DotMap::new();
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let (px, py) = self.viewport.dot_center(bx, by);
                if image.sample((px - x) / size.width, (py - y) / size.height) {
                    self.set_dot(&mut map, bx, by);
                }
            }
        }
        self.write_layer(&map, tui_color(image.color));
    }

    fn draw_rect(&mut self, rect: Bounds, color: Rgb) {
        let (x0, y0) = self.viewport.to_dot(rect.left(), rect.top());
        let (x1, y1) = self.viewport.to_dot(rect.right(), rect.bottom());
        // Anything visible covers at least one dot
        let x1 = x1.max(x0 + 1);
        let y1 = y1.max(y0 + 1);

        let mut map = DotMap::new();
        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_dot(&mut map, bx, by);
            }
        }

        // Fully covered cells become solid blocks of background colour
        let fill = tui_color(color);
        for (&(cx, cy), &bits) in &map {
            if bits == 0xFF {
                self.grid[cy][cx] = (' ', Style::default().bg(fill));
            }
        }
        map.retain(|_, bits| *bits != 0xFF);
        self.write_layer(&map, fill);
    }

    fn draw_text(&mut self, text: &str, area: Bounds, color: Rgb) {
        if self.grid.is_empty() {
            return;
        }
        let (c0, r0, c1, r1) = self.cell_span(area);
        let row = ((r0 + r1) / 2).min(self.grid.len() - 1);
        let len = text.chars().count();
        let start = ((c0 + c1) / 2).saturating_sub(len / 2);

        let fg = tui_color(color);
        let cells = &mut self.grid[row];
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = cells.get_mut(start + i) {
                *cell = (ch, cell.1.fg(fg).add_modifier(Modifier::BOLD));
            }
        }
    }
}
