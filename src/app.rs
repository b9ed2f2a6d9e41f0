use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::assets::Assets;
use crate::event::KeyTracker;
use crate::game::{Action, Input, Invasion};
use crate::settings::Settings;
use crate::ui::canvas::{fullscreen_size, Viewport};

pub struct App {
    pub should_quit: bool,
    pub invasion: Invasion,
    pub assets: Assets,
    /// Where the playfield was last drawn, for mapping mouse clicks
    pub viewport: Option<Viewport>,
    keys: KeyTracker,
    terminal_size: (u16, u16),
}

impl App {
    pub fn new(
        mut settings: Settings,
        assets: Assets,
        terminal_size: (u16, u16),
        full_screen: bool,
        keys: KeyTracker,
    ) -> Self {
        let (width, height) = view_size(&settings, terminal_size, full_screen);
        settings.screen_width = width;
        settings.screen_height = height;
        settings.full_screen = full_screen;

        let invasion = Invasion::new(settings, assets.ship.size(), assets.alien.size());
        Self {
            should_quit: false,
            invasion,
            assets,
            viewport: None,
            keys,
            terminal_size,
        }
    }

    pub fn on_tick(&mut self) {
        for input in self.keys.tick() {
            self.apply(input);
        }
        self.invasion.update();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if let Some(input) = self.keys.translate(key) {
            self.apply(input);
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let point = self
            .viewport
            .and_then(|vp| vp.cell_to_screen(mouse.column, mouse.row));
        if let Some((x, y)) = point {
            self.apply(Input::MouseDown { x, y });
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.terminal_size = (cols, rows);
        if self.invasion.settings().full_screen {
            let (width, height) = fullscreen_size(cols, rows);
            self.invasion.resize(width, height, true);
        }
    }

    fn apply(&mut self, input: Input) {
        match self.invasion.handle_input(input) {
            Action::Quit => self.should_quit = true,
            Action::ToggleFullscreen => self.toggle_view(),
            Action::None => {}
        }
    }

    /// Switch between the fixed window size and the whole terminal
    pub fn toggle_view(&mut self) {
        let full_screen = !self.invasion.settings().full_screen;
        let (width, height) = view_size(self.invasion.settings(), self.terminal_size, full_screen);
        self.invasion.resize(width, height, full_screen);
    }
}

fn view_size(settings: &Settings, terminal: (u16, u16), full_screen: bool) -> (u32, u32) {
    if full_screen {
        fullscreen_size(terminal.0, terminal.1)
    } else {
        (settings.window_width, settings.window_height)
    }
}
