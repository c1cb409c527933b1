//! Dashboard drawing: header, banner, card grid and table.

use image::Rgba;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::client::SensorSource;
use crate::dashboard::{Dashboard, SensorCard, SensorRow};
use crate::renderer::colours::connection_colours;

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 7;

fn rgb(colour: Rgba<u8>) -> Color {
    let [r, g, b, _] = colour.0;
    Color::Rgb(r, g, b)
}

pub fn draw<S: SensorSource>(frame: &mut Frame, dashboard: &Dashboard<S>) {
    let presenter = dashboard.presenter();
    let loading_height = u16::from(presenter.is_loading());
    let banner_height = if presenter.error().is_some() { 3 } else { 0 };
    let table_height = (dashboard.views().table().len() as u16 + 3).min(frame.area().height / 2);

    let [header, loading, banner, grid, table] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(loading_height),
        Constraint::Length(banner_height),
        Constraint::Min(CARD_HEIGHT),
        Constraint::Length(table_height),
    ])
    .areas(frame.area());

    render_header(frame, dashboard, header);
    render_loading(frame, dashboard, loading);
    render_banner(frame, dashboard, banner);
    render_grid(frame, dashboard.views().grid(), grid);
    render_table(frame, dashboard.views().table(), table);
}

fn render_header<S: SensorSource>(frame: &mut Frame, dashboard: &Dashboard<S>, area: Rect) {
    let presenter = dashboard.presenter();
    let connection = presenter.connection();
    let colours = connection_colours(connection);

    let line = Line::from(vec![
        Span::styled(
            "IoT Sensor Dashboard  ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("● ", Style::default().fg(rgb(colours.dot))),
        Span::styled(
            connection.label(),
            Style::default().fg(rgb(colours.badge_fg)).bg(rgb(colours.badge_bg)),
        ),
        Span::raw("  |  "),
        Span::raw(dashboard.auto_refresh_label()),
        Span::raw("  |  Last updated: "),
        Span::raw(presenter.last_updated_display()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" [r] refresh  [a] auto refresh  [q] quit ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_loading<S: SensorSource>(frame: &mut Frame, dashboard: &Dashboard<S>, area: Rect) {
    if dashboard.presenter().is_loading() {
        let text = Paragraph::new("Loading sensor data...")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
    }
}

// Independent of the loading line: both can be up at once.
fn render_banner<S: SensorSource>(frame: &mut Frame, dashboard: &Dashboard<S>, area: Rect) {
    if let Some(message) = dashboard.presenter().error() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Error")
            .border_style(Style::default().fg(Color::Red));
        let text = Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(text, area);
    }
}

fn render_grid(frame: &mut Frame, cards: &[SensorCard], area: Rect) {
    let columns = (area.width / CARD_WIDTH).max(1);
    let visible_rows = area.height / CARD_HEIGHT;

    for (index, card) in cards.iter().enumerate() {
        let index = index as u16;
        let (row, column) = (index / columns, index % columns);
        if row >= visible_rows {
            break;
        }

        let card_area = Rect {
            x: area.x + column * CARD_WIDTH,
            y: area.y + row * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT,
        };
        render_card(frame, card, card_area);
    }
}

fn render_card(frame: &mut Frame, card: &SensorCard, area: Rect) {
    let muted = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(rgb(card.colours.dot))),
            Span::raw(card.status.clone()),
        ]),
        Line::from(vec![
            Span::styled(card.value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(card.unit.clone(), muted),
        ]),
        Line::styled(card.kind.clone(), muted),
        Line::styled(format!("@ {}", card.location), muted),
        Line::styled(card.time.clone(), muted),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(card.name.clone());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(frame: &mut Frame, rows: &[SensorRow], area: Rect) {
    let header = Row::new(vec!["ID", "Type", "Value", "Unit", "Last Updated", "Status"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.id.clone()),
            Cell::from(row.kind.clone()),
            Cell::from(row.value.clone()),
            Cell::from(row.unit.clone()),
            Cell::from(row.time.clone()),
            Cell::from(format!("● {}", row.status)).style(
                Style::default()
                    .fg(rgb(row.colours.badge_fg))
                    .bg(rgb(row.colours.badge_bg)),
            ),
        ])
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(20),
        Constraint::Min(10),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Sensors"));
    frame.render_widget(table, area);
}
