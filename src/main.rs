//! trailplan - Trail race pacing and training calendar

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trailplan::config::{DEFAULT_LEG_THRESHOLD_KM, DEFAULT_OBJECTIVE, DEFAULT_RACE_DATE};
use trailplan::report;
use trailplan::track::gpx::load_track;
use trailplan::{PaceModel, Pipeline, PlanConfig};

#[derive(Parser)]
#[command(name = "trailplan")]
#[command(author, version, about = "Pacing table and training plan from a GPX route")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// GPX file of the race route, for the full report
    file: Option<PathBuf>,

    #[command(flatten)]
    options: PlanOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Pacing table: fixed-distance legs with estimated times
    Legs { file: PathBuf },

    /// Training calendar, one line per session
    Plan { file: PathBuf },

    /// Session counts per type for each week
    Summary { file: PathBuf },

    /// Everything: totals, legs, calendar and summary (default)
    Report { file: PathBuf },
}

#[derive(Args)]
struct PlanOptions {
    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,

    /// Race date (YYYY-MM-DD)
    #[arg(short, long, global = true, env = "TRAILPLAN_RACE_DATE", default_value = DEFAULT_RACE_DATE)]
    race_date: String,

    /// Leg length in km
    #[arg(short, long, global = true, env = "TRAILPLAN_LEG_KM", default_value_t = DEFAULT_LEG_THRESHOLD_KM)]
    leg_km: f64,

    /// Pace on flat ground in km/h
    #[arg(short = 's', long, global = true, env = "TRAILPLAN_FLAT_SPEED")]
    flat_speed: Option<f64>,

    /// Goal for the race, shown in the report
    #[arg(short, long, global = true, env = "TRAILPLAN_OBJECTIVE", default_value = DEFAULT_OBJECTIVE)]
    objective: String,

    /// Plan length in weeks instead of the estimate
    #[arg(short, long, global = true, env = "TRAILPLAN_WEEKS")]
    weeks: Option<u32>,
}

impl PlanOptions {
    fn plan_config(&self) -> trailplan::Result<PlanConfig> {
        let mut pace = PaceModel::default();
        if let Some(speed) = self.flat_speed {
            pace.flat_speed_kmh = speed;
        }
        PlanConfig::new(&self.race_date, self.objective.clone())?
            .with_leg_threshold(self.leg_km)?
            .with_pace(pace)?
            .with_weeks(self.weeks)
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.options.json;

    // No subcommand: full report for the positional file
    let command = match (cli.command, cli.file) {
        (Some(command), _) => command,
        (None, Some(file)) => Commands::Report { file },
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a GPX file is required, e.g. `trailplan route.gpx`",
            )
            .exit(),
    };
    let file = match &command {
        Commands::Legs { file }
        | Commands::Plan { file }
        | Commands::Summary { file }
        | Commands::Report { file } => file.clone(),
    };

    // Bad settings fail here, before the route is even opened
    let pipeline = Pipeline::new(cli.options.plan_config()?)?;

    let route = load_track(&file)
        .with_context(|| format!("cannot load route {}", file.display()))?;

    match command {
        Commands::Legs { .. } => {
            let legs = pipeline.legs(&route.points)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&legs)?);
            } else {
                print!("{}", report::render_legs(&legs));
            }
        }

        Commands::Plan { .. } => {
            let result = pipeline.run(route.name, &route.points)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result.sessions)?);
            } else {
                print!("{}", report::render_sessions(&result.sessions));
            }
        }

        Commands::Summary { .. } => {
            let result = pipeline.run(route.name, &route.points)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result.summary)?);
            } else {
                print!("{}", report::render_summary(&result.summary));
            }
        }

        Commands::Report { .. } => {
            let result = pipeline.run(route.name, &route.points)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_report(&result));
            }
        }
    }

    Ok(())
}
