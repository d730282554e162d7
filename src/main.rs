// ==========================================
// Prospect Intake - CLI Entry Point
// ==========================================
// prospect-intake run --input leads.xlsx --existing sistema.xlsx
// prospect-intake check-tax-id 111.444.777-35
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use prospect_intake::config::{config_keys, ConfigManager, IntakeConfigReader};
use prospect_intake::engine::{is_valid_tax_id, TracingEventPublisher};
use prospect_intake::exporter::summary_lines;
use prospect_intake::i18n::{self, t_with_args};
use prospect_intake::importer::data_cleaner::TAX_ID_LEN;
use prospect_intake::importer::{
    ConflictHandlerImpl, DataCleaner, DataCleanerImpl, FieldMapperImpl, ImportError, IntakeRequest,
    ProspectImporter, ProspectImporterImpl, UniversalFileParser,
};
use prospect_intake::lookup::ViaCepClient;
use prospect_intake::repository::{
    ExistingSystemRepository, FileExistingSystemRepo, SqliteExistingSystemRepo,
};
use prospect_intake::{logging, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "prospect-intake")]
#[command(about = "Validate, reconcile and export prospective customer records")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full intake pipeline
    Run(RunArgs),
    /// Check a single tax ID (CPF) checksum
    CheckTaxId {
        /// Tax ID, punctuation allowed
        value: String,
    },
}

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("existing_source")
        .required(true)
        .args(["existing", "existing_db"]),
))]
struct RunArgs {
    /// Prospect spreadsheet (.xlsx/.xls/.csv)
    #[arg(long)]
    input: PathBuf,

    /// Existing-system export (.xlsx/.xls/.csv with a `cpf` column)
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Existing-system SQLite database
    #[arg(long)]
    existing_db: Option<PathBuf>,

    /// Rejected records output (CSV)
    #[arg(long)]
    rejected: Option<PathBuf>,

    /// Accepted records output (JSON)
    #[arg(long)]
    accepted: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output language: en | pt-BR
    #[arg(long)]
    locale: Option<String>,

    /// Reference date for the age rule (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value}: {e}"))
}

fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary, &i18n::current_locale()) {
        println!("{}", line);
    }
}

async fn run_with_repo<R>(repo: R, config: ConfigManager, request: IntakeRequest) -> Result<()>
where
    R: ExistingSystemRepository,
{
    let timeout = Duration::from_secs(config.get_postal_lookup_timeout_secs().await?);
    let base_url = config.get_postal_lookup_base_url().await?;
    let lookup = ViaCepClient::new(&base_url, timeout).context("postal lookup client")?;
    let cleaner = DataCleanerImpl::new(config.get_birth_date_formats().await?);

    let importer = ProspectImporterImpl::new(
        repo,
        config,
        Arc::new(lookup),
        Box::new(UniversalFileParser),
        Box::new(FieldMapperImpl),
        Box::new(cleaner),
        Box::new(ConflictHandlerImpl),
    )
    .with_event_publisher(Arc::new(TracingEventPublisher));

    let report = match importer.import_file(&request).await {
        Ok(report) => report,
        Err(ImportError::FileNotFound(path)) => {
            anyhow::bail!(t_with_args("message.file_not_found", &[("path", &path)]))
        }
        Err(e) => return Err(e.into()),
    };

    print_summary(report.summary());
    let rejected_path = report.rejected_path.display().to_string();
    let accepted_path = report.accepted_path.display().to_string();
    println!("{}", t_with_args("message.rejected_written", &[("path", &rejected_path)]));
    println!("{}", t_with_args("message.accepted_written", &[("path", &accepted_path)]));
    Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = ConfigManager::load(args.config.as_deref())?;
    if let Some(locale) = &args.locale {
        config.set(config_keys::LOCALE, locale.as_str());
    }

    let locale = config.get_locale().await?;
    i18n::set_locale(&locale);
    info!(config = %config.get_config_snapshot()?, "configuration loaded");

    let request = IntakeRequest {
        input_path: args.input,
        rejected_path: match args.rejected {
            Some(path) => path,
            None => config.get_rejected_output_path().await?,
        },
        accepted_path: match args.accepted {
            Some(path) => path,
            None => config.get_accepted_output_path().await?,
        },
        today: args.today.unwrap_or_else(|| chrono::Local::now().date_naive()),
    };

    match (args.existing, args.existing_db) {
        (Some(path), _) => {
            let column = config.get_existing_system_column().await?;
            let repo = FileExistingSystemRepo::new(path, &column);
            run_with_repo(repo, config, request).await
        }
        (None, Some(db_path)) => {
            let table = config.get_existing_system_table().await?;
            let column = config.get_existing_system_column().await?;
            let db_path = db_path.display().to_string();
            let repo = SqliteExistingSystemRepo::new(&db_path, &table, &column)
                .with_context(|| format!("opening existing system database {db_path}"))?;
            run_with_repo(repo, config, request).await
        }
        (None, None) => anyhow::bail!("either --existing or --existing-db is required"),
    }
}

fn check_tax_id(value: &str) -> ExitCode {
    let normalized = DataCleanerImpl::default().clean_digits(value, Some(TAX_ID_LEN));
    if is_valid_tax_id(&normalized) {
        println!("{}", t_with_args("message.tax_id_valid", &[("value", &normalized)]));
        ExitCode::SUCCESS
    } else {
        println!("{}", t_with_args("message.tax_id_invalid", &[("value", value)]));
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match cli.command {
        Commands::Run(args) => {
            run(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckTaxId { value } => Ok(check_tax_id(&value)),
    }
}
