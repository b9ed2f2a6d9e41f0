pub mod canvas;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use canvas::{window_cells, BrailleCanvas, Viewport};

const BORDER: Color = Color::Rgb(80, 80, 110);
const HINT_KEY: Color = Color::Rgb(80, 200, 255);
const HINT_TEXT: Color = Color::Rgb(140, 140, 160);

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let settings = app.invasion.settings();
    let (screen_w, screen_h) = (settings.screen_width, settings.screen_height);

    let field = if settings.full_screen {
        area
    } else {
        // The window keeps its own size, centred, shrinking only when the
        // terminal is too small for it
        let (cols, rows) = window_cells(screen_w, screen_h);
        let w = cols.saturating_add(2).min(area.width);
        let h = rows.saturating_add(2).min(area.height);
        let window = Rect::new(
            area.x + (area.width - w) / 2,
            area.y + (area.height - h) / 2,
            w,
            h,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title(" Alien Invasion ")
            .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .title_bottom(controls_hint());
        let inner = block.inner(window);
        frame.render_widget(block, window);
        inner
    };

    if field.width == 0 || field.height == 0 {
        app.viewport = None;
        return;
    }

    let viewport = Viewport::new(field, screen_w, screen_h);
    let mut canvas = BrailleCanvas::new(&app.assets, viewport);
    app.invasion.draw(&mut canvas);
    frame.render_widget(Paragraph::new(canvas.into_lines()), field);
    app.viewport = Some(viewport);
}

fn controls_hint() -> Line<'static> {
    let key = Style::default().fg(HINT_KEY).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(HINT_TEXT);
    Line::from(vec![
        Span::styled(" ←→", key),
        Span::styled(" Move | ", text),
        Span::styled("Space", key),
        Span::styled(" Fire | ", text),
        Span::styled("W", key),
        Span::styled(" View | ", text),
        Span::styled("Q", key),
        Span::styled(" Quit ", text),
    ])
}
