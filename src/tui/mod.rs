//! TUI module - weekly schedule, day view and stats with ratatui

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, Gauge, GraphType, Paragraph, Row, Table,
        TableState, Wrap,
    },
};
use std::io::{Stdout, stdout};

use crate::analytics::ChartSeries;
use crate::calendar::{self, WEEK_DAYS, week_date_labels};
use crate::db::KvStore;
use crate::exercises::{DaySchedule, Exercise, find_day};
use crate::session::Session;
use crate::store::{DailyStatRecord, SetLogEntry};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    Schedule,
    Day(Weekday),
    Stats,
}

#[derive(Debug, Clone)]
enum Prompt {
    LogWeight { exercise_id: &'static str },
    LogReps { exercise_id: &'static str, weight: String },
    StatWeight,
    StatCalories,
    ConfirmReset,
}

impl Prompt {
    fn title(&self) -> &'static str {
        match self {
            Prompt::LogWeight { .. } => "Weight (kg)",
            Prompt::LogReps { .. } => "Reps",
            Prompt::StatWeight => "Body weight (kg)",
            Prompt::StatCalories => "Calories burned",
            Prompt::ConfirmReset => "Delete ALL logs and stats? (y/n)",
        }
    }
}

/// App state for TUI
pub struct App<S: KvStore> {
    session: Session<S>,
    today: NaiveDate,
    screen: Screen,
    selected_day: usize,
    selected_exercise: usize,
    prompt: Option<Prompt>,
    input: String,
    stats_draft: DailyStatRecord,
    status: String,
    should_quit: bool,
}

impl<S: KvStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        let today = calendar::today();
        let stats_draft = session.stats_draft(today);
        let selected_day = WEEK_DAYS
            .iter()
            .position(|d| *d == today.weekday())
            .unwrap_or(0);
        Self {
            session,
            today,
            screen: Screen::Schedule,
            selected_day,
            selected_exercise: 0,
            prompt: None,
            input: String::new(),
            stats_draft,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        let result = self.event_loop(&mut terminal);
        let restored = restore_terminal();
        finish(result, restored)
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            self.roll_over(calendar::today());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Move to a new day; the stats form restarts from that day's record
    fn roll_over(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.stats_draft = self.session.stats_draft(today);
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = match self.screen {
            Screen::Schedule => "liftlog - Weekly Program".to_string(),
            Screen::Day(day) => match find_day(day) {
                Some(plan) => format!("{} - {}", plan.day_name, plan.focus),
                None => "Unknown day".to_string(),
            },
            Screen::Stats => format!("Daily stats - {}", calendar::short_label(self.today)),
        };
        let header = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match self.screen {
            Screen::Schedule => self.render_schedule(frame, chunks[1]),
            Screen::Day(day) => match find_day(day) {
                Some(plan) => self.render_day(frame, chunks[1], plan),
                None => frame.render_widget(Paragraph::new("Day not found"), chunks[1]),
            },
            Screen::Stats => self.render_stats(frame, chunks[1]),
        }

        let keys = match self.screen {
            Screen::Schedule => "q: quit | ↑↓: select | enter: open | s: stats | R: reset",
            Screen::Day(_) => "esc: back | ↑↓: select | l: log set | q: quit",
            Screen::Stats => "esc: back | w: weight | c: calories | s: save | q: quit",
        };
        let footer_text = if self.status.is_empty() {
            keys.to_string()
        } else {
            format!("{keys}  ·  {}", self.status)
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);

        if let Some(prompt) = &self.prompt {
            let area = centered_rect(50, 3, frame.area());
            let text = match prompt {
                Prompt::ConfirmReset => String::new(),
                _ => format!("{}_", self.input),
            };
            let popup = Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(prompt.title()));
            frame.render_widget(Clear, area);
            frame.render_widget(popup, area);
        }
    }

    fn render_schedule(&self, frame: &mut Frame, area: Rect) {
        let labels = week_date_labels(self.today);
        let rows: Vec<Row> = labels
            .iter()
            .map(|(day, label)| {
                let (name, focus, rest) = match find_day(*day) {
                    Some(plan) => (plan.day_name, plan.focus, plan.rest_day),
                    None => (calendar::day_id(*day), "-", true),
                };
                let badge = if *day == self.today.weekday() { "today" } else { "" };
                let style = if rest {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(name),
                    Cell::from(label.clone()),
                    Cell::from(focus),
                    Cell::from(badge).style(Style::default().fg(Color::Green)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Min(20),
                Constraint::Length(6),
            ],
        )
        .header(Row::new(vec!["Day", "Date", "Focus", ""]).style(Style::default().bold()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("This week"));

        let mut state = TableState::default().with_selected(Some(self.selected_day));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_day(&self, frame: &mut Frame, area: Rect, plan: &DaySchedule) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(area);

        let supplements = if plan.supplements.is_empty() {
            "-".to_string()
        } else {
            plan.supplements.join(", ")
        };
        let info = Paragraph::new(format!("Supplements: {supplements}"))
            .block(Block::default().borders(Borders::ALL).title("Supplement guide"));
        frame.render_widget(info, chunks[0]);

        if plan.rest_day {
            let rest = Paragraph::new("Rest day. Muscles grow while you recover, sleep well!")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(rest, chunks[1]);
            return;
        }

        let today = self.today;
        let rows: Vec<Row> = plan
            .exercises
            .iter()
            .map(|ex| {
                let view = self.session.exercise_view_at(ex.id, today);
                Row::new(vec![
                    Cell::from(ex.name),
                    Cell::from(format!("{} x {}", ex.sets, ex.reps)),
                    Cell::from(format!("RPE {}", ex.rpe)),
                    Cell::from(format!("{}s", ex.rest_secs())),
                    Cell::from(format!("{}%", view.progress_percent)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(22),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(5),
            ],
        )
        .header(
            Row::new(vec!["Exercise", "Sets x Reps", "RPE", "Rest", "Done"])
                .style(Style::default().bold()),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Exercises"));
        let mut state = TableState::default().with_selected(Some(self.selected_exercise));
        frame.render_stateful_widget(table, chunks[1], &mut state);

        let Some(exercise) = plan.exercises.get(self.selected_exercise) else {
            return;
        };
        let view = self.session.exercise_view_at(exercise.id, today);
        let last_hint = view
            .last_entry
            .as_ref()
            .map(|e| format!("Last: {}kg x {}", e.weight, e.reps))
            .unwrap_or_else(|| "No sets logged yet".to_string());
        let detail = vec![
            Line::from(format!("Today: {}", format_sets(&view.todays_sets))),
            Line::from(format!("Last session: {}", format_sets(&view.last_session_sets))),
            Line::from(last_hint).style(Style::default().fg(Color::DarkGray)),
            Line::from(exercise.note.unwrap_or("")).style(Style::default().italic()),
        ];
        let detail = Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(exercise.name));
        frame.render_widget(detail, chunks[2]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(view.progress_percent.min(100) as u16);
        frame.render_widget(gauge, chunks[3]);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(8)])
            .split(area);

        let saved = self.session.daily_stats(self.today).is_some();
        let form = Paragraph::new(vec![
            Line::from(format!("Weight:   {} kg", or_dash(&self.stats_draft.weight))),
            Line::from(format!("Calories: {} kcal", or_dash(&self.stats_draft.calories))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(if saved { "Today (saved)" } else { "Today (not saved)" }),
        );
        frame.render_widget(form, chunks[0]);

        let series = self.session.chart_series();
        let points = match &series {
            ChartSeries::Points(points) => points,
            ChartSeries::InsufficientData => {
                let placeholder = Paragraph::new("Enter your weight on at least 2 days to see the chart.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL).title("Weight trend"));
                frame.render_widget(placeholder, chunks[1]);
                return;
            }
        };

        let data: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.weight))
            .collect();
        let min = points.iter().map(|p| p.weight).fold(f64::INFINITY, f64::min) - 1.0;
        let max = points.iter().map(|p| p.weight).fold(f64::NEG_INFINITY, f64::max) + 1.0;
        let x_labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();

        let dataset = Dataset::default()
            .name("kg")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data);
        let chart = Chart::new(vec![dataset])
            .block(Block::default().borders(Borders::ALL).title("Weight trend"))
            .x_axis(
                Axis::default()
                    .bounds([0.0, (points.len() - 1) as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .bounds([min, max])
                    .labels([format!("{min:.1}"), format!("{max:.1}")]),
            );
        frame.render_widget(chart, chunks[1]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if self.prompt.is_some() {
                self.handle_prompt_key(key.code)?;
            } else {
                self.handle_screen_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_screen_key(&mut self, code: KeyCode) {
        match (self.screen, code) {
            (_, KeyCode::Char('q')) => self.should_quit = true,

            (Screen::Schedule, KeyCode::Up | KeyCode::Char('k')) => {
                self.selected_day = self.selected_day.saturating_sub(1);
            }
            (Screen::Schedule, KeyCode::Down | KeyCode::Char('j')) => {
                self.selected_day = (self.selected_day + 1).min(WEEK_DAYS.len() - 1);
            }
            (Screen::Schedule, KeyCode::Enter) => {
                self.selected_exercise = 0;
                self.screen = Screen::Day(WEEK_DAYS[self.selected_day]);
            }
            (Screen::Schedule, KeyCode::Char('s')) => {
                self.stats_draft = self.session.stats_draft(self.today);
                self.screen = Screen::Stats;
            }
            (Screen::Schedule, KeyCode::Char('R')) => self.open_prompt(Prompt::ConfirmReset),

            (Screen::Day(_), KeyCode::Up | KeyCode::Char('k')) => {
                self.selected_exercise = self.selected_exercise.saturating_sub(1);
            }
            (Screen::Day(day), KeyCode::Down | KeyCode::Char('j')) => {
                let count = find_day(day).map_or(0, |d| d.exercises.len());
                self.selected_exercise = (self.selected_exercise + 1).min(count.saturating_sub(1));
            }
            (Screen::Day(day), KeyCode::Char('l') | KeyCode::Enter) => {
                if let Some(exercise) = self.selected(day) {
                    self.open_prompt(Prompt::LogWeight { exercise_id: exercise.id });
                }
            }

            (Screen::Stats, KeyCode::Char('w')) => self.open_prompt(Prompt::StatWeight),
            (Screen::Stats, KeyCode::Char('c')) => self.open_prompt(Prompt::StatCalories),
            (Screen::Stats, KeyCode::Char('s')) => {
                let draft = self.stats_draft.clone();
                self.status = match self.session.save_daily_stats_at(&draft.weight, &draft.calories, self.today) {
                    Ok(()) => "Stats saved".to_string(),
                    Err(err) => format!("Save failed: {err:#}"),
                };
            }

            (Screen::Day(_) | Screen::Stats, KeyCode::Esc | KeyCode::Backspace) => {
                self.screen = Screen::Schedule;
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) -> Result<()> {
        let Some(prompt) = self.prompt.take() else {
            return Ok(());
        };

        if let Prompt::ConfirmReset = prompt {
            let confirmed = matches!(code, KeyCode::Char('y') | KeyCode::Char('Y'));
            self.status = match self.session.reset_all_data(confirmed) {
                Ok(true) => {
                    self.stats_draft = self.session.stats_draft(self.today);
                    "All data deleted".to_string()
                }
                Ok(false) => "Reset cancelled".to_string(),
                Err(err) => format!("Reset failed: {err:#}"),
            };
            return Ok(());
        }

        match code {
            KeyCode::Esc => {
                self.input.clear();
                return Ok(());
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => self.input.push(c),
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input);
                self.submit(prompt, value);
                return Ok(());
            }
            _ => {}
        }
        self.prompt = Some(prompt);
        Ok(())
    }

    fn submit(&mut self, prompt: Prompt, value: String) {
        match prompt {
            Prompt::LogWeight { exercise_id } => {
                self.open_prompt(Prompt::LogReps { exercise_id, weight: value });
            }
            Prompt::LogReps { exercise_id, weight } => {
                self.status = match self.session.log_set(exercise_id, &weight, &value) {
                    Ok(Some(entry)) => format!("Logged {}kg x {}", entry.weight, entry.reps),
                    Ok(None) => "A set needs both weight and reps".to_string(),
                    Err(err) => format!("Log failed: {err:#}"),
                };
            }
            Prompt::StatWeight => self.stats_draft.weight = value,
            Prompt::StatCalories => self.stats_draft.calories = value,
            Prompt::ConfirmReset => {}
        }
    }

    fn open_prompt(&mut self, prompt: Prompt) {
        self.input.clear();
        self.status.clear();
        self.prompt = Some(prompt);
    }

    fn selected(&self, day: Weekday) -> Option<&'static Exercise> {
        find_day(day)?.exercises.get(self.selected_exercise)
    }
}

/// "60x10, 62x8", or "-" when empty
pub fn format_sets(sets: &[SetLogEntry]) -> String {
    if sets.is_empty() {
        return "-".to_string();
    }
    sets.iter()
        .map(|e| format!("{}x{}", e.weight, e.reps))
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// Popup area, `percent_x` wide and `height` rows tall
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Loop error wins over a failed terminal restore
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let (Err(_), Err(err)) = (&result, &restored) {
        tracing::error!("failed to restore terminal: {err:#}");
    }
    result.and(restored)
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
