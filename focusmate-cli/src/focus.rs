//! Full-screen countdown timer. Runs an interval, records the session, and
//! suggests the next break from the preset's cycle cadence.

use anyhow::{bail, Result};
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use focusmate_core::{FocusSession, Task, TaskId};
use focusmate_store::Store;

use crate::config::resolve_tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    Stopped,
}

pub fn run_focus(task_id: Option<TaskId>, preset: Option<String>, minutes: Option<i32>) -> Result<()> {
    let (cfg, mut store) = crate::open_configured_store()?;
    let tz = resolve_tz(&cfg)?;

    let task = match task_id {
        Some(id) => match store.task(id)? {
            Some(t) => Some(t),
            None => bail!("no task with id {id}"),
        },
        None => None,
    };

    let preset = match &preset {
        Some(name) => {
            let found = store
                .presets()?
                .into_iter()
                .find(|p| p.name.eq_ignore_ascii_case(name.trim()));
            match found {
                Some(p) => Some(p),
                None => bail!("no preset named '{name}' (see: focusmate preset list)"),
            }
        }
        None => None,
    };

    // --minutes beats the preset, which beats the configured default.
    let planned = minutes
        .or_else(|| preset.as_ref().map(|p| p.focus_min))
        .unwrap_or(cfg.timer.default_minutes);
    if planned < 1 {
        bail!("planned minutes must be at least 1");
    }

    let started_at = Utc::now();
    let outcome = run_countdown(task.as_ref(), planned)?;
    let ended_at = Utc::now();

    let session = FocusSession::from_interval(
        task.as_ref().map(|t| t.id),
        started_at,
        ended_at,
        planned,
        outcome == Outcome::Stopped,
    );
    let session = store.add_session(session)?;

    let how = match outcome {
        Outcome::Completed => "auto complete",
        Outcome::Stopped => "manual stop",
    };
    println!(
        "Session saved ({how}): {} min of a planned {}.",
        session.actual_minutes, session.planned_minutes
    );

    if let Some(p) = preset {
        let today = ended_at.with_timezone(&tz).date_naive();
        let cycles_today = store
            .sessions()?
            .iter()
            .filter(|s| s.started_at.with_timezone(&tz).date_naive() == today)
            .count() as i32;
        let (break_min, kind) = p.break_after(cycles_today);
        println!("Next: take a {kind} break ({break_min} min). Cycle {cycles_today} of the day.");
    }

    Ok(())
}

fn run_countdown(task: Option<&Task>, planned_minutes: i32) -> Result<Outcome> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = countdown_loop(&mut terminal, task, planned_minutes);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn countdown_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    task: Option<&Task>,
    planned_minutes: i32,
) -> Result<Outcome> {
    let total_secs = planned_minutes as u64 * 60;
    let start = Instant::now();

    loop {
        let elapsed = start.elapsed().as_secs();
        let remaining = total_secs.saturating_sub(elapsed);
        if remaining == 0 {
            return Ok(Outcome::Completed);
        }

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(3),
                    Constraint::Length(3),
                ])
                .split(size);

            let title = match task {
                Some(t) => format!("focusing on: {}", t.title),
                None => "untracked focus time".to_string(),
            };
            let header = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "FocusMate",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(title, Style::default().fg(Color::Cyan))),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, chunks[0]);

            // Final minute turns the clock red.
            let clock_style = if remaining <= 60 {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            };
            let clock = Paragraph::new(Line::from(Span::styled(format_clock(remaining), clock_style)))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("remaining"));
            f.render_widget(clock, chunks[1]);

            let ratio = (elapsed as f64 / total_secs as f64).clamp(0.0, 1.0);
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("progress"))
                .gauge_style(Style::default().fg(Color::Cyan))
                .ratio(ratio);
            f.render_widget(gauge, chunks[2]);

            let footer = Paragraph::new(Line::from(Span::styled(
                "q or Esc = stop early (the time still counts)",
                Style::default().fg(Color::Gray),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(footer, chunks[3]);
        })?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(Outcome::Stopped),
                    _ => {}
                }
            }
        }
    }
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
