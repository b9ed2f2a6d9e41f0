use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen. A failure part way through
/// puts the terminal back before returning the error.
pub fn init(reports_release: bool) -> Result<Tui> {
    setup(reports_release).inspect_err(|_| {
        if let Err(e) = restore(reports_release) {
            log::error!("Failed to restore terminal: {e}");
        }
    })
}

fn setup(reports_release: bool) -> Result<Tui> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter the alternate screen")?;
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("failed to enable key release events")?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Undo everything `init` may have done
pub fn restore(reports_release: bool) -> io::Result<()> {
    restore_with(&mut io::stdout(), reports_release, disable_raw_mode)
}

/// Runs every step even when an earlier one fails; returns the first error.
fn restore_with(
    out: &mut impl Write,
    reports_release: bool,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let mut steps = Vec::with_capacity(5);
    if reports_release {
        steps.push(execute!(out, PopKeyboardEnhancementFlags));
    }
    steps.push(disable_raw());
    steps.push(execute!(out, LeaveAlternateScreen));
    steps.push(execute!(out, DisableMouseCapture));
    steps.push(execute!(out, Show));
    steps.into_iter().collect()
}

/// Restore the terminal before the panic message is printed
pub fn install_panic_hook(reports_release: bool) {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore(reports_release);
        log::error!("{info}");
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_restore_writes_every_step() {
        let mut out = Vec::new();
        let mut raw_disabled = false;
        restore_with(&mut out, true, || {
            raw_disabled = true;
            Ok(())
        })
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(raw_disabled);
        assert!(text.contains("\x1b[<1u"), "pop keyboard flags: {text:?}");
        assert!(text.contains("\x1b[?1049l"), "leave alternate screen: {text:?}");
        assert!(text.contains("\x1b[?1000l"), "mouse capture off: {text:?}");
        assert!(text.contains("\x1b[?25h"), "cursor shown: {text:?}");
    }

    #[test]
    fn test_restore_skips_pop_without_enhancement() {
        let mut out = Vec::new();
        restore_with(&mut out, false, || Ok(())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("\x1b[<1u"));
        assert!(text.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_failed_write_still_leaves_raw_mode() {
        let mut raw_disabled = false;
        let result = restore_with(&mut BrokenPipe, true, || {
            raw_disabled = true;
            Ok(())
        });
        assert!(raw_disabled);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_first_error_is_reported() {
        let mut out = Vec::new();
        let result = restore_with(&mut out, false, || {
            Err(io::Error::new(io::ErrorKind::Other, "raw mode"))
        });
        assert_eq!(result.unwrap_err().to_string(), "raw mode");
        // Later steps still ran
        assert!(String::from_utf8(out).unwrap().contains("\x1b[?25h"));
    }
}
