use compartment_store::storage::Console;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, console: &Console) {
    let sections = Layout::vertical([Constraint::Length(6), Constraint::Min(3)]).split(area);

    let stats_block = Block::default().title("Storage").borders(Borders::ALL);
    let stats_area = stats_block.inner(sections[0]);
    frame.render_widget(stats_block, sections[0]);

    let storage = console.storage();
    let delivery_pct = (console.delivery_progress() * 100.0).min(100.0);
    let room = if storage.can_open_compartment() {
        Span::styled("yes", Style::default().fg(Color::LightGreen))
    } else {
        Span::styled("no", Style::default().fg(Color::Red))
    };

    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Total capacity", Style::default().fg(Color::Yellow)),
            Span::raw(format!(": {:.1}", storage.total_capacity())),
            Span::raw("    Stored: "),
            Span::raw(format!("{:.1}", storage.total_stored())),
        ]),
        Line::from(vec![
            Span::raw("Room for another compartment: "),
            room,
        ]),
        Line::from(vec![
            Span::raw("Deliveries received: "),
            Span::raw(format!("{}", console.deliveries_received())),
            Span::raw("    Next delivery: "),
            Span::raw(format!("{delivery_pct:.0}%")),
        ]),
    ];

    let paragraph = Paragraph::new(stats_lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, stats_area);

    let log_block = Block::default().title("Event Log").borders(Borders::ALL);
    let log_area = log_block.inner(sections[1]);
    frame.render_widget(log_block, sections[1]);

    let mut items: Vec<ListItem> = console
        .messages()
        .map(|msg| ListItem::new(msg.clone()))
        .collect();
    if items.is_empty() {
        items.push(ListItem::new("Nothing has happened yet."));
    }
    frame.render_widget(List::new(items), log_area);
}
