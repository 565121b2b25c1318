use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " auditview ",
            Style::default().fg(theme::BG_DARK).bg(theme::AMBER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.source), Style::default().fg(theme::TEXT)),
    ];

    if let Some(stats) = app.stats {
        spans.push(Span::styled(
            format!("  [{} rows, {} users]", stats.rows, stats.users),
            Style::default().fg(theme::TEXT_DIM),
        ));
        let grouping = match stats.granularity {
            Some(granularity) => Span::styled(
                format!("  by {}", granularity),
                Style::default().fg(theme::CYAN),
            ),
            None => Span::styled("  ungrouped", Style::default().fg(theme::TEXT_MUTED)),
        };
        spans.push(grouping);
    }

    if app.watch {
        spans.push(Span::styled("  ↻ watching", Style::default().fg(theme::GREEN)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
