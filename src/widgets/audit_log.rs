use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::theme;
use crate::view::{AuditRender, GroupSection};

const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let render = match &app.rendered {
        LoadState::Loaded(render) => render,
        LoadState::Error(msg) => {
            let error = Paragraph::new(format!(" {}", msg)).style(Style::default().fg(theme::RED));
            frame.render_widget(error, area);
            return;
        }
        LoadState::Loading => {
            let loading = Paragraph::new(format!(" Loading {}...", app.source))
                .style(Style::default().fg(theme::TEXT_MUTED));
            frame.render_widget(loading, area);
            return;
        }
    };

    let paragraph = Paragraph::new(render_lines(render)).scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

/// One line per line of the plain rendering, so scroll offsets agree with
/// [`AuditRender::line_count`].
pub fn render_lines(render: &AuditRender) -> Vec<Line<'static>> {
    match render {
        AuditRender::Empty { message } => vec![Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(theme::TEXT_DIM),
        ))],
        AuditRender::Grouped { summary, sections } => {
            let widths = column_widths(sections);
            let mut lines = vec![Line::from(Span::styled(
                format!(" {}", summary),
                Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
            ))];
            for section in sections {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!(" {}", section.header),
                    Style::default().fg(theme::AMBER).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    padded_row(&section.columns, &widths),
                    Style::default().fg(theme::TEXT_DIM).add_modifier(Modifier::BOLD),
                )));
                lines.extend(section.rows.iter().map(|row| {
                    Line::from(Span::styled(
                        padded_row(&row.cells, &widths),
                        Style::default().fg(theme::TEXT),
                    ))
                }));
            }
            lines
        }
    }
}

/// Shared across sections so columns line up down the whole view.
fn column_widths(sections: &[GroupSection]) -> Vec<usize> {
    let mut widths: Vec<usize> = vec![];
    let cells = sections.iter().flat_map(|section| {
        std::iter::once(&section.columns).chain(section.rows.iter().map(|row| &row.cells))
    });
    for row in cells {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count()).min(MAX_COLUMN_WIDTH);
        }
    }
    widths
}

fn padded_row(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from(" ");
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(COLUMN_GAP);
        }
        let width = widths.get(i).copied().unwrap_or(0);
        let text = truncate(cell, width);
        out.push_str(&format!("{:<width$}", text, width = width));
    }
    out.trim_end().to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RenderedRow;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn grouped() -> AuditRender {
        let columns: Vec<String> = ["Created", "Column", "Old", "New", "By"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let row = |id: &str, created: &str, by: &str| RenderedRow {
            id: id.to_string(),
            cells: vec![
                created.to_string(),
                "Name".to_string(),
                "a".to_string(),
                "b".to_string(),
                by.to_string(),
            ],
        };
        AuditRender::Grouped {
            summary: "3 changes made by 2 users".to_string(),
            sections: vec![
                GroupSection {
                    key: 10,
                    header: "10:00 - 11:00".to_string(),
                    columns: columns.clone(),
                    rows: vec![row("1", "2021-04-03T10:15:00", "alice")],
                },
                GroupSection {
                    key: 11,
                    header: "11:00 - 12:00".to_string(),
                    columns,
                    rows: vec![
                        row("2", "2021-04-03T11:40:00", "bob"),
                        row("3", "2021-04-03T11:05:00", "alice"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn line_layout_matches_plain_line_count() {
        let render = grouped();
        assert_eq!(render_lines(&render).len(), render.line_count());
        let empty = AuditRender::Empty {
            message: "nothing".to_string(),
        };
        assert_eq!(render_lines(&empty).len(), empty.line_count());
    }

    #[test]
    fn columns_are_aligned_across_sections() {
        let lines = render_lines(&grouped());
        let header: String = lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        let row: String = lines[4].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(header.find("Column"), row.find("Name"));
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        let long = "x".repeat(100);
        let widths = column_widths(&[GroupSection {
            key: 0,
            header: String::new(),
            columns: vec!["c".to_string()],
            rows: vec![RenderedRow {
                id: "1".to_string(),
                cells: vec![long],
            }],
        }]);
        assert_eq!(widths, vec![MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn draws_summary_headers_and_rows() {
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let render = grouped();
        terminal
            .draw(|frame| {
                let area = frame.area();
                frame.render_widget(Paragraph::new(render_lines(&render)), area);
            })
            .expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("3 changes made by 2 users"));
        assert!(text.contains("10:00 - 11:00"));
        assert!(text.contains("11:00 - 12:00"));
        assert!(text.contains("bob"));
    }
}
