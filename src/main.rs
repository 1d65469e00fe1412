//! liftlog - Personal workout tracker

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use liftlog::analytics::ChartSeries;
use liftlog::calendar::{self, day_id, parse_day_id, week_date_labels};
use liftlog::db::{Database, KvStore, MemoryStore};
use liftlog::exercises::{find_day, find_exercise};
use liftlog::session::Session;
use liftlog::tui::{App, format_sets};

const DB_PATH: &str = "liftlog.db";

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Personal workout tracker")]
struct Cli {
    /// SQLite file holding logs and stats
    #[arg(long, global = true, env = "LIFTLOG_DB", default_value = DB_PATH)]
    db: String,

    /// Keep everything in memory, nothing is saved
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Show this week's program
    Schedule,

    /// Show a day's exercises with today's progress
    Day {
        /// Day name (e.g. "monday", "fri"), defaults to today
        day: Option<String>,
    },

    /// Log one set
    Log {
        /// Exercise id (e.g. "bench_press")
        exercise: String,
        /// Weight in kg
        weight: String,
        /// Repetitions
        reps: String,
    },

    /// Show or save today's body stats
    Stats {
        /// Body weight in kg
        #[arg(short, long)]
        weight: Option<String>,

        /// Calories burned
        #[arg(short, long)]
        calories: Option<String>,
    },

    /// Print the body-weight trend
    Chart,

    /// Delete all logs and stats
    Reset {
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let storage: Box<dyn KvStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(Database::open(&cli.db)?)
    };
    let mut session = Session::open(storage);
    let today = calendar::today();

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(session);
            app.run()?;
        }

        Some(Commands::Schedule) => {
            println!("Weekly program");
            println!("{:-<50}", "");
            for (day, label) in week_date_labels(today) {
                let marker = if day == today.weekday() { " <- today" } else { "" };
                match find_day(day) {
                    Some(plan) => println!("{:10} {:7} {}{}", plan.day_name, label, plan.focus, marker),
                    None => println!("{:10} {:7} -{}", day_id(day), label, marker),
                }
            }
        }

        Some(Commands::Day { day }) => {
            let weekday = match day {
                Some(name) => match parse_day_id(&name) {
                    Some(d) => d,
                    None => bail!("unknown day: {name}"),
                },
                None => today.weekday(),
            };
            let Some(plan) = find_day(weekday) else {
                bail!("no program for {}", day_id(weekday));
            };

            println!("{} - {}", plan.day_name, plan.focus);
            println!("{:-<60}", "");
            if !plan.supplements.is_empty() {
                println!("Supplements: {}", plan.supplements.join(", "));
            }
            if plan.rest_day {
                println!("Rest day. Muscles grow while you recover.");
            }
            for ex in plan.exercises {
                let view = session.exercise_view_at(ex.id, today);
                println!(
                    "{:24} {:>5} x {:6} RPE {:3} rest {:>4}s | {:>3}% ({})",
                    ex.name,
                    ex.sets,
                    ex.reps,
                    ex.rpe,
                    ex.rest_secs(),
                    view.progress_percent,
                    ex.id
                );
                println!("    today: {}", format_sets(&view.todays_sets));
                println!("    last:  {}", format_sets(&view.last_session_sets));
            }
        }

        Some(Commands::Log { exercise, weight, reps }) => {
            if find_exercise(&exercise).is_none() {
                eprintln!("note: '{exercise}' is not in the weekly program");
            }
            match session.log_set(&exercise, &weight, &reps)? {
                Some(entry) => {
                    let view = session.exercise_view_at(&exercise, today);
                    println!(
                        "Logged: {} - {}kg x {} (set {} today, {}%)",
                        exercise,
                        entry.weight,
                        entry.reps,
                        view.todays_sets.len(),
                        view.progress_percent
                    );
                }
                None => println!("Nothing logged: weight and reps are required"),
            }
        }

        Some(Commands::Stats { weight, calories }) => {
            let draft = session.stats_draft(today);
            if weight.is_none() && calories.is_none() {
                let state = if session.daily_stats(today).is_some() { "saved" } else { "not saved" };
                println!("{} ({state})", calendar::date_key(today));
                println!("Weight:   {}", draft.weight);
                println!("Calories: {}", draft.calories);
            } else {
                let weight = weight.unwrap_or(draft.weight);
                let calories = calories.unwrap_or(draft.calories);
                session.save_daily_stats_at(&weight, &calories, today)?;
                println!("Saved: weight {weight}, calories {calories}");
            }
        }

        Some(Commands::Chart) => match session.chart_series() {
            ChartSeries::Points(points) => {
                println!("Weight trend");
                println!("{:-<30}", "");
                for point in points {
                    println!("{:7} {:6.1} kg", point.label, point.weight);
                }
            }
            ChartSeries::InsufficientData => {
                println!("Enter your weight on at least 2 days to see the chart.");
            }
        },

        Some(Commands::Reset { yes }) => {
            let confirmed = yes || confirm("Delete ALL workout logs and daily stats? [y/N] ")?;
            if session.reset_all_data(confirmed)? {
                println!("All data deleted");
            } else {
                println!("Reset cancelled");
            }
        }
    }

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
