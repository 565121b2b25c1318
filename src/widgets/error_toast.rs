use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some((ref msg, _)) = app.last_error else {
        return;
    };

    // Sits just above the footer
    let toast_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };

    let line = Line::from(vec![
        Span::styled(" ERROR ", Style::default().fg(Color::White).bg(theme::RED)),
        Span::styled(format!(" {}", msg), Style::default().fg(theme::RED)),
    ]);

    let toast = Paragraph::new(line).style(Style::default().bg(theme::BG_DARK));
    frame.render_widget(toast, toast_area);
}
