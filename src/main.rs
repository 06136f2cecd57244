use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use baccarat_terminal::config::AppConfig;
use baccarat_terminal::display::BarElement;
use baccarat_terminal::logging;
use baccarat_terminal::outcome::Outcome;
use baccarat_terminal::predictor_api::{Action, HttpPredictorApi};
use baccarat_terminal::provider::spawn_provider;
use baccarat_terminal::state::{self, AppState, ProviderCommand, apply_delta};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(state: AppState, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.dispatch(Action::AddOutcome(Outcome::Player))
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.dispatch(Action::AddOutcome(Outcome::Banker))
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.dispatch(Action::AddOutcome(Outcome::Tie))
            }
            KeyCode::Backspace | KeyCode::Char('u') | KeyCode::Char('U') => {
                self.dispatch(Action::DeletePrevious)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.dispatch(Action::ResetSession),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn dispatch(&mut self, action: Action) {
        let cmd = self.state.issue(action);
        let ProviderCommand::Perform { seq, .. } = cmd;
        if self.cmd_tx.send(cmd).is_err() {
            self.state.abandon(seq);
        } else {
            self.state.push_log(format!("[INFO] Sent {action} (#{seq})"));
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load();
    logging::init_file_logging(config.log_file.as_deref())?;

    let api = HttpPredictorApi::new(&config)?;
    let mut initial = AppState::with_bootstrap(&config.bootstrap);
    initial.server_url = api.base_url().to_string();
    initial.push_log(format!("[INFO] Connected to {}", initial.server_url));

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let _provider = spawn_provider(api, tx, cmd_rx);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(initial, cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(6),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_prediction(frame, chunks[1], &app.state);
    render_history(frame, chunks[2], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(
        "p Player | b Banker | t Tie | Backspace/u Undo | r Reset | ? Help | q Quit",
    )
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[4]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let pending = if state.in_flight > 0 {
        format!(" | {} pending", state.in_flight)
    } else {
        String::new()
    };
    format!("BACCARAT PREDICTOR | {}{pending}", state.server_url)
}

fn outcome_color(outcome: Option<Outcome>) -> Color {
    match outcome {
        Some(Outcome::Player) => Color::Blue,
        Some(Outcome::Banker) => Color::Red,
        Some(Outcome::Tie) => Color::Green,
        None => Color::DarkGray,
    }
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Prediction").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let predicted_pct = state.view.prediction_bar.width_pct.round().clamp(0.0, 100.0) as u16;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(predicted_pct),
            Constraint::Percentage(100 - predicted_pct),
        ])
        .split(inner);

    render_bar(frame, cols[0], &state.view.prediction_bar, true);
    render_bar(frame, cols[1], &state.view.opposite_bar, false);
}

fn render_bar(frame: &mut Frame, area: Rect, bar: &BarElement, primary: bool) {
    let label = match bar.background {
        Some(outcome) => format!("{} {:.0}%", outcome.label(), bar.width_pct),
        None => format!("{:.0}%", bar.width_pct),
    };
    let mut style = Style::default()
        .fg(Color::White)
        .bg(outcome_color(bar.background));
    if primary {
        style = style.add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(""); (area.height.saturating_sub(1) / 2) as usize];
    lines.push(Line::from(label));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!("History ({})", state.view.history.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    if state.view.history.is_empty() {
        let empty = Paragraph::new("No outcomes yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut spans = Vec::with_capacity(state.view.history.len() * 2);
    for marker in &state.view.history {
        spans.push(Span::styled(
            format!(" {} ", marker.text()),
            Style::default()
                .fg(Color::White)
                .bg(outcome_color(Some(marker.outcome)))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    let history = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(history, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(4);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Baccarat Predictor - Help",
        "",
        "  p / b / t        Record Player / Banker / Tie",
        "  Backspace / u    Delete previous outcome",
        "  r                Reset session",
        "  ?                Toggle help",
        "  q / Esc          Quit",
        "",
        "Bars: predicted outcome (left) and its opposite (right).",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
