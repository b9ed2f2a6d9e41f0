use std::collections::HashMap;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use crate::game::{Input, Key};

/// How long a movement key stays held without a repeat, when the terminal
/// cannot report key releases. Covers the OS delay before auto-repeat.
const HOLD_WINDOW: Duration = Duration::from_millis(500);

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms.max(1));

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(event::Event::Key(key)) => Some(Event::Key(key)),
                        Ok(event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }
                // A steady stream of input must not starve the frame clock
                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Char('q') | KeyCode::Char('Q') => Key::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') => Key::ToggleView,
        KeyCode::Enter => Key::Start,
        _ => Key::Other,
    }
}

fn is_hold_key(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right)
}

/// Turns terminal key events into game input.
///
/// Terminals with the keyboard enhancement protocol report releases
/// directly. Everywhere else a held key shows up as repeated presses, so
/// a movement key counts as released once its presses stop arriving.
pub struct KeyTracker {
    reports_release: bool,
    hold_ticks: u64,
    tick: u64,
    held: HashMap<Key, u64>,
}

impl KeyTracker {
    pub fn new(reports_release: bool, tick_rate_ms: u64) -> Self {
        let tick_ms = tick_rate_ms.max(1) as u128;
        let hold_ticks = HOLD_WINDOW.as_millis().div_ceil(tick_ms) as u64;
        Self {
            reports_release,
            hold_ticks,
            tick: 0,
            held: HashMap::new(),
        }
    }

    /// Ticks a silent movement key counts as held
    pub fn hold_ticks(&self) -> u64 {
        self.hold_ticks
    }

    pub fn translate(&mut self, key: KeyEvent) -> Option<Input> {
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Some(Input::Quit);
        }

        let mapped = map_key(key.code);
        match key.kind {
            KeyEventKind::Press => {
                if !self.reports_release && is_hold_key(mapped) {
                    self.held.insert(mapped, self.tick);
                }
                Some(Input::KeyDown(mapped))
            }
            KeyEventKind::Release => {
                self.held.remove(&mapped);
                Some(Input::KeyUp(mapped))
            }
            KeyEventKind::Repeat => None,
        }
    }

    /// Advance one tick; returns releases for holds that went quiet
    pub fn tick(&mut self) -> Vec<Input> {
        self.tick += 1;
        if self.reports_release {
            return Vec::new();
        }
        let now = self.tick;
        let window = self.hold_ticks;
        let mut released = Vec::new();
        self.held.retain(|&key, &mut since| {
            let alive = now - since <= window;
            if !alive {
                released.push(Input::KeyUp(key));
            }
            alive
        });
        released
    }
}
