pub mod app;
pub mod ui;

use std::{
    io::{self, Stdout},
    time::Duration,
};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use crate::tui::app::{App, InputMode};
use crate::Service;

pub fn run(service: Service, today: NaiveDate) -> Result<()> {
    // Fails before touching the terminal when no semester is configured.
    let mut app = App::new(service, today)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                KeyCode::Char('t') => app.go_to_today(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_lecture(),
                KeyCode::Char('H') => app.toggle_holiday(),
                KeyCode::Char('L') => app.request_leave(),
                _ => {}
            },
            InputMode::ConfirmLeave => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => app.confirm_leave(),
                KeyCode::Char('n') | KeyCode::Esc => app.cancel(),
                _ => {}
            },
        }
    }
}
