use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
};

use domtable_engine::TOGGLES;

use super::app::App;
use crate::presentation::glyphs::{Glyph, LabelColor, cell_glyph, column_header};

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_filter_bar(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status(f, chunks[2], app);
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let filter = app.view.filter();
    let mut spans = Vec::new();
    for (i, toggle) in TOGGLES.iter().enumerate() {
        let style = if filter.is_shown(*toggle) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("F{}", i + 2), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(format!(" {} ", toggle.value()), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let columns = app.view.columns();
    let rows: Vec<_> = app.view.visible_rows().collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let width = rows
                .iter()
                .filter_map(|row| row.cell(i))
                .map(|value| cell_glyph(column, value).plain().chars().count())
                .fold(column_header(column).chars().count(), usize::max);
            Constraint::Length(width.max(1) as u16)
        })
        .collect();

    let header = TableRow::new(columns.iter().map(|column| Cell::from(column_header(column))))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        TableRow::new(columns.iter().enumerate().map(|(i, column)| {
            let glyph = cell_glyph(column, row.cell(i).unwrap_or_default());
            match glyph {
                Glyph::Label(Some(color)) => Cell::from(Span::styled(
                    glyph.plain().to_string(),
                    Style::default().fg(label_color(color)),
                )),
                _ => Cell::from(glyph.plain().to_string()),
            }
        }))
    });

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.view;
    let mut lines = Vec::new();

    if let Some(error) = view.error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(warning) = &app.monitor_warning {
        lines.push(Line::from(Span::styled(
            warning.clone(),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(notice) = &app.notice {
        lines.push(Line::from(notice.as_str()));
    }

    let refreshed = view
        .refreshed_at()
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    lines.push(Line::from(Span::styled(
        format!(
            "{} of {} domains  refreshed {}  (r)efresh (q)uit",
            app.visible_count(),
            view.table().len(),
            refreshed
        ),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn label_color(color: LabelColor) -> Color {
    match color {
        LabelColor::Red => Color::Red,
        LabelColor::Orange => Color::LightRed,
        LabelColor::Yellow => Color::Yellow,
        LabelColor::Green => Color::Green,
        LabelColor::Gray => Color::Gray,
        LabelColor::Blue => Color::Blue,
        LabelColor::Purple => Color::Magenta,
        LabelColor::Black => Color::DarkGray,
    }
}
