mod app;
mod ui;

use anyhow::Result;
use app::App;
use compartment_store::config::load_config;
use compartment_store::storage::Console;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "compartment-store.log";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = load_config()?;
    let mut console = Console::new(&config)?;
    console.add_message(format!(
        "Storage ready: {:.1} total in compartments of {:.1}.",
        config.total_capacity, config.compartment_capacity
    ));
    tracing::info!(?config, "console started");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut console, App::new(config.step)).await;
    restore_terminal(&mut terminal)?;

    tracing::info!(deliveries = console.deliveries_received(), "console stopped");
    result
}

// The terminal owns stdout, so diagnostics go to a file.
fn init_tracing() -> Result<()> {
    let file = File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    console: &mut Console,
    mut app: App,
) -> Result<()> {
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    task::spawn(async move {
        loop {
            match task::spawn_blocking(crossterm::event::read).await {
                Ok(Ok(event)) => {
                    if input_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Err(_)) => break,
                Err(_) => break,
            }
        }
    });

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(100);
    let mut should_quit = false;

    loop {
        terminal.draw(|f| ui::render(f, &app, console))?;
        if should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        tokio::select! {
            Some(event) = input_rx.recv() => {
                if handle_event(event, &mut app, console) {
                    should_quit = true;
                }
            }
            _ = tokio::time::sleep(timeout) => {
                let delta = last_tick.elapsed();
                last_tick = Instant::now();
                console.update(delta);
            }
        }
    }

    Ok(())
}

fn handle_event(event: Event, app: &mut App, console: &mut Console) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, console),
        _ => false,
    }
}

/// Returns `true` when the operator asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, console: &mut Console) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.report_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R') => {
                app.toggle_report();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        };
    }

    let cereal = app.selected_cereal();
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.move_selection(1),
        KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('A') => {
            // Failures are already in the event log.
            let _ = console.add(cereal, app.step);
        }
        KeyCode::Char('w') | KeyCode::Char('W') => {
            let _ = console.withdraw(cereal, app.step);
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            console.remove(cereal);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => app.double_step(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.halve_step(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.toggle_report(),
        _ => {}
    }
    false
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
