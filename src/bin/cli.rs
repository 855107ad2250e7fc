//! Patient Dashboard CLI
//!
//! Command-line interface for the patient dashboard:
//! - Show the full dashboard
//! - List patients
//! - Print a patient's diagnosis history
//! - Generate a config file

use clap::{Parser, Subcommand};
use patient_dashboard::config::{generate_default_config, Config};
use patient_dashboard::dashboard::DashboardState;
use patient_dashboard::loader::{get_patient_data, HttpPatientSource, Loaded};
use patient_dashboard::view::{
    patient_list, render_diagnosis, render_patient_list, render_text, DashboardView,
    DiagnosisPanel, EMPTY_MESSAGE,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patient-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Patient diagnosis dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Patient service URL (overrides config)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log level for diagnostics on stderr (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the full dashboard
    Show {
        /// Patient to select instead of the default
        #[arg(short, long)]
        patient: Option<String>,
    },

    /// List all patients
    List,

    /// Show a patient's diagnosis history
    History {
        /// Patient to show instead of the default
        #[arg(short, long)]
        patient: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { patient } => {
            let state = load_or_exit(&cli.config, &cli.url, &cli.log_level).await?;
            let state = select(state, patient.as_deref());
            let view = DashboardView::from_state(&state);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view));
            }
        }

        Commands::List => {
            let state = load_or_exit(&cli.config, &cli.url, &cli.log_level).await?;
            let items = patient_list(&state);

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print!("{}", render_patient_list(&items));
            }
        }

        Commands::History { patient } => {
            let state = load_or_exit(&cli.config, &cli.url, &cli.log_level).await?;
            let state = select(state, patient.as_deref());

            let Some(selected) = state.selected_patient() else {
                eprintln!("No patient selected. Use --patient <NAME>.");
                std::process::exit(1);
            };

            let panel = DiagnosisPanel::from_patient(selected);
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&panel)?);
            } else {
                println!("{}", selected.name);
                print!("{}", render_diagnosis(&panel));
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Resolve config, init logging and load; exits when there is no data
async fn load_or_exit(
    config_path: &Option<PathBuf>,
    url: &Option<String>,
    log_level: &Option<String>,
) -> anyhow::Result<DashboardState> {
    let (mut config, report) = match config_path {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, report) = Config::load_default();
            (config, Some(report))
        }
    };
    apply_flags(&mut config, url.as_deref(), log_level.as_deref());
    config.logging.init();
    if let Some(report) = report {
        report.log();
    }

    let state = load_dashboard(&config).await?;
    if state.is_empty() {
        println!("{}", EMPTY_MESSAGE);
        std::process::exit(1);
    }

    Ok(state)
}

/// Command-line flags win over file and environment, but only when given
fn apply_flags(config: &mut Config, url: Option<&str>, log_level: Option<&str>) {
    if let Some(url) = url {
        config.source.url = url.to_string();
    }
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
}

/// Run the single load and fold the outcome into a snapshot
async fn load_dashboard(config: &Config) -> anyhow::Result<DashboardState> {
    let source = HttpPatientSource::new(config.source.source_config())?;
    let token = config.source.credentials().token();
    let state = DashboardState::new();

    let mut staged = Loaded::default();
    let result = get_patient_data(
        &source,
        &token,
        &config.source.default_patient,
        &mut staged,
    )
    .await;

    let state = match result {
        Ok(()) => state.loaded(staged),
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Error fetching patient data");
            state.failed(e.to_string())
        }
    };

    Ok(state)
}

/// Apply a `--patient` selection, exiting if the name is unknown
fn select(state: DashboardState, patient: Option<&str>) -> DashboardState {
    match patient {
        None => state,
        Some(name) => match state.select_by_name(name) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    }
}
