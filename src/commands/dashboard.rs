//! Dashboard command implementation
//!
//! This module implements the default `dashboard` subcommand: a full-screen
//! terminal UI that recomputes all city prices on every slider change.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use flat_prices::{
    config::Config,
    dashboard::{ui, DashboardApp, KeyAction},
    service::PriceService,
};

/// Execute the dashboard command
pub fn execute(cfg: &Config) -> Result<()> {
    // Load the model before touching the terminal so startup failures stay readable
    let service = PriceService::from_config(cfg)?;

    run_dashboard(&service)
}

/// Run the dashboard event loop
fn run_dashboard(service: &PriceService) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear screen on startup
    terminal.clear()?;

    // Initialize state
    let mut app = DashboardApp::new(
        service.presentation().clone(),
        Some(service.model().info().clone()),
    );
    app.refresh(service);
    info!("Dashboard started");

    // Main loop; input is the only trigger for recomputation
    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::render(f, &app)) {
            break Err(e.into());
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match app.handle_key(key) {
                KeyAction::Quit => break Ok(()),
                KeyAction::Recompute => app.refresh(service),
                KeyAction::Redraw | KeyAction::Ignore => {}
            },
            // Resizes and other events just redraw
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Dashboard closed");
    result
}
