use crate::app::App;
use compartment_store::storage::{Cereal, Console};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, app: &App, console: &Console) {
    let storage = console.storage();
    let capacity = storage.compartment_capacity();

    let items: Vec<ListItem> = Cereal::ALL
        .iter()
        .map(|cereal| {
            if !storage.contains(cereal) {
                let style = if storage.can_open_compartment() {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                return ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<10}", cereal.name()), style),
                    Span::styled("  no compartment", style),
                ]));
            }

            let amount = storage.amount_of(cereal);
            let free = storage.free_space_of(cereal);
            let fill = if capacity > 0.0 { amount / capacity } else { 0.0 };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", cereal.name()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(fill_bar(fill), Style::default().fg(Color::LightGreen)),
                Span::raw(format!("  {amount:.1}/{capacity:.1} (free {free:.1})")),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Compartments")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected.min(Cereal::ALL.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn fill_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::fill_bar;

    #[test]
    fn fill_bar_scales_to_width() {
        assert_eq!(fill_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(fill_bar(0.5), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(fill_bar(3.0), format!("[{}]", "#".repeat(20)));
    }
}
