use crate::app::App;
use compartment_store::storage::Console;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub mod compartments_view;
pub mod events_view;
pub mod report_view;

pub fn render(frame: &mut Frame, app: &App, console: &Console) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], app, console);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);

    compartments_view::render(frame, columns[0], app, console);
    events_view::render(frame, columns[1], console);

    render_footer(frame, layout[2]);

    if app.report_open {
        report_view::render(frame, console);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, console: &Console) {
    let storage = console.storage();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Compartment Store",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  Stored: "),
            Span::styled(
                format!("{:.1}/{:.1}", storage.total_stored(), storage.total_capacity()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  •  Compartments: "),
            Span::styled(
                format!(
                    "{} open × {:.1}",
                    storage.open_compartments(),
                    storage.compartment_capacity()
                ),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  •  Step: "),
            Span::styled(format!("{}", app.step), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![Span::raw(
            "Select a cereal, then add or withdraw one step at a time.",
        )]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Hotkeys: "),
        Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
        Span::raw(" navigate  •  "),
        Span::styled("[A/Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" add  •  "),
        Span::styled("[W]", Style::default().fg(Color::Yellow)),
        Span::raw(" withdraw  •  "),
        Span::styled("[X]", Style::default().fg(Color::Yellow)),
        Span::raw(" remove empty  •  "),
        Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
        Span::raw(" step  •  "),
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw(" report  •  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
