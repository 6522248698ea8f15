//! GymDash CLI
//!
//! Drives the dashboard's view controller, chat and progress helpers against a
//! running backend, with an in-memory page standing in for the browser:
//! - Load a view or follow a deep link and print the installed fragment
//! - Chat with the coach
//! - Cycle progress indicators and save day notes
//! - Modify the workout plan and regenerate meals

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gymdash::api::{DashboardApi, PlanModification};
use gymdash::chat::{BubbleContent, ChatSession, Exchange};
use gymdash::config::{generate_default_config, Config, LoggingConfig};
use gymdash::page::MemoryPage;
use gymdash::progress::{
    Indicator, NutritionStatus, ProgressBoard, ProgressTracker, SaveOutcome, WorkoutStatus,
};
use gymdash::transport::{HttpTransport, Transport};
use gymdash::view::{Transition, ViewController, ViewRegistry};

#[derive(Parser)]
#[command(name = "gymdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the GymAI dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard backend origin (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Cookie header of a logged-in session (overrides config)
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a dashboard section (e.g. "workout" or "/chat")
    View { name: String },

    /// Open the dashboard at a URL, following its ?tab= deep link
    Open {
        /// Path and query, e.g. "/dashboard/?tab=nutrition"
        url: String,
    },

    /// Send a message to the coach
    Chat { message: String },

    /// Advance one indicator of a day and save it
    Progress {
        /// Day, as YYYY-MM-DD
        date: NaiveDate,
        indicator: IndicatorArg,
        /// Workout status currently shown for the day
        #[arg(long, default_value = "missed", value_parser = parse_workout)]
        workout: WorkoutStatus,
        /// Nutrition status currently shown for the day
        #[arg(long, default_value = "none", value_parser = parse_nutrition)]
        nutrition: NutritionStatus,
    },

    /// Save a day's note
    Note { date: NaiveDate, text: String },

    /// Ask the coach to rework the workout plan
    ModifyPlan {
        #[arg(long, default_value = "")]
        goal: String,
        #[arg(long, default_value = "")]
        schedule: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Generate a new meal plan
    RegenerateMeals,

    /// Print a default config file
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IndicatorArg {
    Workout,
    Nutrition,
}

impl From<IndicatorArg> for Indicator {
    fn from(arg: IndicatorArg) -> Self {
        match arg {
            IndicatorArg::Workout => Indicator::Workout,
            IndicatorArg::Nutrition => Indicator::Nutrition,
        }
    }
}

fn parse_workout(value: &str) -> Result<WorkoutStatus, String> {
    Ok(WorkoutStatus::from_attr(value))
}

fn parse_nutrition(value: &str) -> Result<NutritionStatus, String> {
    Ok(NutritionStatus::from_attr(value))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.base_url {
        config.server.base_url = url;
    }
    if let Some(cookie) = cli.cookie {
        config.server.cookie = Some(cookie);
    }

    init_tracing(&config.logging);
    tracing::debug!(base_url = %config.server.base_url, "GymDash v{}", env!("CARGO_PKG_VERSION"));

    let transport: Rc<dyn Transport> = Rc::new(HttpTransport::new(config.transport_config())?);

    let succeeded = run(cli.command, &config, transport).await;
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gymdash={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries fragments; logs go to stderr
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run one command; false when it ended in a fallback or failure
async fn run(command: Commands, config: &Config, transport: Rc<dyn Transport>) -> bool {
    let registry = Rc::new(
        ViewRegistry::standard()
            .default_loading_message(&config.dashboard.loading_message)
            .build(),
    );

    match command {
        Commands::View { name } => {
            let page = Rc::new(MemoryPage::new());
            let controller = controller(registry, transport, page.clone(), config);
            let outcome = controller.select_view(&name).await;
            report_transition(outcome, &page)
        }

        Commands::Open { url } => {
            let page = Rc::new(MemoryPage::with_url(&url));
            let controller = controller(registry, transport, page.clone(), config);
            let outcome = controller.deep_link_on_load().await;
            tracing::info!(url = %page.url(), active = ?page.active_entry(), "Deep link consumed");
            report_transition(outcome, &page)
        }

        Commands::ModifyPlan {
            goal,
            schedule,
            notes,
        } => {
            let page = Rc::new(MemoryPage::new());
            let controller = controller(registry, transport, page.clone(), config);
            let plan = PlanModification::from_inputs(&goal, &schedule, &notes);
            let outcome = controller.modify_workout_plan(&plan).await;
            report_transition(outcome, &page)
        }

        Commands::RegenerateMeals => {
            let page = Rc::new(MemoryPage::new());
            let controller = controller(registry, transport, page.clone(), config);
            let outcome = controller.regenerate_meal_plan().await;
            report_transition(outcome, &page)
        }

        Commands::Chat { message } => {
            let page = Rc::new(MemoryPage::new());
            let session = ChatSession::new(DashboardApi::new(transport), page.clone());

            let outcome = session.send(&message).await;
            if let Some(reply) = page.bubbles().last() {
                match &reply.content {
                    BubbleContent::Markup(html) => print!("{}", html),
                    BubbleContent::Text(text) => eprintln!("{}", text),
                }
            }
            outcome == Exchange::Answered
        }

        Commands::Progress {
            date,
            indicator,
            workout,
            nutrition,
        } => {
            let page = Rc::new(MemoryPage::new());
            page.add_day(date, workout, nutrition);
            let tracker = ProgressTracker::new(DashboardApi::new(transport), page.clone());

            let outcome = tracker.cycle(date, indicator.into()).await;
            if outcome == SaveOutcome::Rendered {
                if let Some(day) = page.day(date) {
                    println!("{}: workout {}, nutrition {}", date, day.workout, day.nutrition);
                }
                if let Some(streaks) = page.streaks() {
                    println!(
                        "Streaks: workout {} (best {}), nutrition {} (best {}), overall {} (best {})",
                        streaks.workout_current,
                        streaks.workout_best,
                        streaks.nutrition_current,
                        streaks.nutrition_best,
                        streaks.overall_current,
                        streaks.overall_best,
                    );
                }
            } else {
                eprintln!("Progress update {:?}", outcome);
            }
            outcome == SaveOutcome::Rendered
        }

        Commands::Note { date, text } => {
            let page = Rc::new(MemoryPage::new());
            let tracker = ProgressTracker::new(DashboardApi::new(transport), page.clone());

            let outcome = tracker.save_note(date, &text).await;
            match page.note(date) {
                Some(saved) => println!("{}: {}", date, saved),
                None => eprintln!("Saving note {:?}", outcome),
            }
            outcome == SaveOutcome::Rendered
        }

        // Handled before any config is loaded
        Commands::Config => true,
    }
}

fn controller(
    registry: Rc<ViewRegistry>,
    transport: Rc<dyn Transport>,
    page: Rc<MemoryPage>,
    config: &Config,
) -> ViewController {
    ViewController::with_options(
        registry,
        transport,
        page,
        config.dashboard.controller_options(),
    )
}

fn report_transition(outcome: Transition, page: &MemoryPage) -> bool {
    match outcome {
        Transition::Applied => {
            println!("{}", page.content());
            true
        }
        Transition::Failed => {
            eprintln!("{}", page.content());
            false
        }
        Transition::UnknownView => {
            eprintln!("Unknown view");
            false
        }
        Transition::Superseded => false,
    }
}
