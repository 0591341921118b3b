//! Emberlevel - Entry Point
//!
//! Interactive terminal demo: earn experience, watch level-ups resolve and
//! the HUD follow along.

use std::io;
use std::time::{Duration, Instant};
use std::fs::OpenOptions;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame,
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use emberlevel::data::{export_default_config, loader::CONFIG_FILE_NAME};
use emberlevel::game::{Game, GameState};
use emberlevel::progression::Attribute;

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("emberlevel.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Emberlevel v{}", env!("CARGO_PKG_VERSION"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new();

    let result = run_game_loop(&mut terminal, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Emberlevel shut down cleanly");
    result
}

/// Main game loop
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, game);
                }
            }
        }

        game.update(delta);

        terminal.draw(|frame| render(frame, game))?;

        if game.state() == GameState::Quit {
            break;
        }

        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}

fn handle_key(key: KeyEvent, game: &mut Game) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => game.quit(),
        KeyCode::Char('x') => {
            game.grant_random_experience();
        }
        KeyCode::Char('b') => game.grant_experience(500),
        KeyCode::Char('d') => {
            let dealt = game.damage_player(10);
            game.add_message(format!("Took {} damage", dealt));
        }
        KeyCode::Char('m') => {
            let spent = game.drain_magic(10);
            game.add_message(format!("Spent {} magic", spent));
        }
        KeyCode::Char('r') => game.rest(),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            // Errors are already reported in the message log
            let _ = game.spend_stat_point(Attribute::ALL[index]);
        }
        KeyCode::Char('e') => {
            let path = std::path::Path::new("assets/data").join(CONFIG_FILE_NAME);
            match export_default_config(&path) {
                Ok(()) => game.add_message(format!("Exported tuning to {}", path.display())),
                Err(e) => game.add_message(format!("Export failed: {}", e)),
            }
        }
        _ => {}
    }
}

fn render(frame: &mut Frame, game: &Game) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(20)])
        .split(frame.area());

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(3)])
        .split(columns[0]);

    if let Some(hud) = game.player_hud() {
        hud.render(frame, left[0]);
    }

    let attributes: Vec<Line> = match game.player_progress() {
        Some(progress) => Attribute::ALL
            .iter()
            .enumerate()
            .map(|(i, attr)| {
                Line::from(format!("{} {:<10}{:>3}", i + 1, attr.name(), progress.attributes().get(*attr)))
            })
            .collect(),
        None => Vec::new(),
    };
    frame.render_widget(
        Paragraph::new(attributes).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Attributes ")
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        left[1],
    );

    let height = columns[1].height.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = game
        .messages()
        .iter()
        .rev()
        .take(height)
        .rev()
        .map(|m| Line::from(m.as_str()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "[x] XP  [b] +500 XP  [d] hurt  [m] cast  [r] rest  [1-5] spend  [e] export  [q] quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Log ")
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        columns[1],
    );
}
