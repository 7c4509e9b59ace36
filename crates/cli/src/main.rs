use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cre_core::{modules, prompt, recommend, EngineError, KnowledgeBase, PatientRecord};

#[derive(Parser)]
#[command(name = "cre")]
#[command(about = "Clinical rule evaluation engine CLI")]
struct Cli {
    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the knowledge base and print the clinical summary as JSON
    Summarise {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// Print risk predictions for the record
    Risks {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// Print care recommendations for the record
    Advise {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// Print graded clinical alerts for the record
    Alerts {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// Print condition-specific disease modules for the record
    Modules {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// Render the knowledge base and record as a prompt block
    Prompt {
        /// Patient record file (JSON or YAML)
        file: PathBuf,
    },
    /// List the knowledge-base rule catalog
    Rules,
}

#[derive(Debug, PartialEq, Eq)]
enum RecordFormat {
    Json,
    Yaml,
}

fn record_format(path: &Path) -> Result<RecordFormat, EngineError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(RecordFormat::Yaml),
        Some("json") | None => Ok(RecordFormat::Json),
        Some(other) => Err(EngineError::InvalidInput(format!(
            "unsupported record format '.{}': expected .json, .yaml or .yml",
            other
        ))),
    }
}

fn load_record(path: &Path) -> Result<PatientRecord, Box<dyn std::error::Error>> {
    let format = record_format(path)?;
    let contents = std::fs::read_to_string(path)?;
    let record = match format {
        RecordFormat::Yaml => serde_yaml::from_str(&contents)?,
        RecordFormat::Json => serde_json::from_str(&contents)?,
    };
    Ok(record)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cre_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let today = cli
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    match cli.command {
        Some(Commands::Summarise { file }) => {
            let record = load_record(&file)?;
            let summary = cre_core::evaluate_at(&record, today)?;
            println!("{}", summary.to_json()?);
        }
        Some(Commands::Risks { file }) => {
            let record = load_record(&file)?;
            let risks = cre_core::predict_risks_at(&record, today)?;
            println!("{}", serde_json::to_string_pretty(&risks)?);
        }
        Some(Commands::Advise { file }) => {
            let record = load_record(&file)?;
            record.validate()?;
            let recs = recommend::recommendations_at(&record, today);
            println!("{}", serde_json::to_string_pretty(&recs)?);
        }
        Some(Commands::Alerts { file }) => {
            let record = load_record(&file)?;
            record.validate()?;
            let alerts = recommend::clinical_alerts_at(&record, today);
            println!("{}", serde_json::to_string_pretty(&alerts)?);
        }
        Some(Commands::Modules { file }) => {
            let record = load_record(&file)?;
            record.validate()?;
            let modules = modules::disease_modules(&record);
            println!("{}", serde_json::to_string_pretty(&modules)?);
        }
        Some(Commands::Prompt { file }) => {
            let record = load_record(&file)?;
            record.validate()?;
            println!("{}", prompt::build_user_prompt(&record, today));
        }
        Some(Commands::Rules) => {
            for rule in KnowledgeBase::standard().rules() {
                println!("{}", rule.catalog_line());
            }
        }
        None => {
            println!("Use 'cre --help' for commands");
        }
    }

    Ok(())
}
