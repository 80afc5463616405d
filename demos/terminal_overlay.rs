//! Terminal demo using crossterm and ratatui.
//!
//! The terminal stands in for the screen: every character cell is one "pixel".
//! Press the labelled keys to narrow the grid, arrows to nudge on single
//! layers, Backspace to undo, Space to click the current center, Esc to quit.
//! Run with: cargo run --example terminal_overlay [path/to/config.json]

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridclick::config::{default_config, load_or_default};
use gridclick::{ClickButton, Region, Session, SessionEvent, crop_region};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::Path;

struct App {
    session: Session,
    message: String,
    finished: bool,
}

impl App {
    fn new(screen: Region) -> Self {
        let config = match std::env::args().nth(1) {
            Some(path) => load_or_default(Path::new(&path)).0,
            None => default_config(),
        };
        Self {
            session: Session::activate(config, screen, ClickButton::Left),
            message: "Pick a cell".to_string(),
            finished: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(key) = key_name(event) else {
            return;
        };

        match self.session.handle_key(&key) {
            SessionEvent::Ignored => self.message = format!("{key}: ignored"),
            SessionEvent::Advanced => {
                self.message = format!("{key}: depth {}", self.session.state().history.len())
            }
            SessionEvent::Clicked(request) => {
                self.message = format!(
                    "{:?} click at ({}, {}). Press any key to exit.",
                    request.button, request.point.x, request.point.y
                );
                self.finished = true;
            }
            SessionEvent::Cancelled => {
                self.message = "Cancelled. Press any key to exit.".to_string();
                self.finished = true;
            }
        }
    }
}

/// Host key names, spelled the way a browser or OS hook would report them.
fn key_name(event: CKeyEvent) -> Option<String> {
    let name = match event.code {
        CKeyCode::Char(' ') => "Space".to_string(),
        CKeyCode::Char(c) => c.to_string(),
        CKeyCode::Esc => "Escape".to_string(),
        CKeyCode::Backspace => "Backspace".to_string(),
        CKeyCode::Enter => "Enter".to_string(),
        CKeyCode::Left => "ArrowLeft".to_string(),
        CKeyCode::Right => "ArrowRight".to_string(),
        CKeyCode::Up => "ArrowUp".to_string(),
        CKeyCode::Down => "ArrowDown".to_string(),
        _ => return None,
    };
    Some(name)
}

fn to_rect(region: Region, area: Rect) -> Rect {
    let x = region.x.floor().max(0.0) as u16;
    let y = region.y.floor().max(0.0) as u16;
    let right = region.right().ceil().max(0.0) as u16;
    let bottom = region.bottom().ceil().max(0.0) as u16;
    Rect::new(x, y, right.saturating_sub(x).max(1), bottom.saturating_sub(y).max(1))
        .intersection(area)
}

fn ui(f: &mut Frame, app: &App) {
    let area = f.size();
    let screen = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
    let status_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);

    let region = app.session.region();
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
        to_rect(region, screen),
    );

    if let Some(step) = app.session.current_step() {
        for (index, label) in step.keys.iter().enumerate() {
            let cell = crop_region(region, step.rows, step.cols, index as u32 + 1);
            let rect = to_rect(cell, screen);
            let text = Paragraph::new(label.to_uppercase())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(text, rect);
        }
    }

    let status = Paragraph::new(app.message.as_str())
        .style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(status, status_area);
}

fn main() -> Result<(), io::Error> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create("gridclick-demo.log") {
        Ok(log_file) => {
            if let Err(err) = WriteLogger::init(LevelFilter::Debug, log_config, log_file) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let screen = Region::new(
        0.0,
        0.0,
        f64::from(size.width),
        f64::from(size.height.saturating_sub(1)),
    );
    let mut app = App::new(screen);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.finished
                || (key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                break;
            }
            app.handle_crossterm_event(key);
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
