use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use tax_cli::app::{self, GROQ_API_KEY_VAR};
use tax_cli::render::{self, OutputFormat};
use tax_cli::utils::rupees_arg;
use tax_cli::{batch, logging, profile_csv};
use tax_core::{FinancialProfile, RiskAppetite, StrategyProfile, TaxLiabilityEngine};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax liability under the old and new regimes.
///
/// Computes both regimes for a profile, recommends the cheaper one and lists
/// the tax-saving steps still open. Amounts accept `₹`, `Rs.` and comma
/// grouping (`₹15,00,000`).
#[derive(Debug, Parser)]
#[command(name = "taxwise", version)]
struct Cli {
    /// TOML file overriding assessment year, cess, standard deductions and caps.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// CSV slab table; rows for the configured assessment year replace the
    /// built-in slabs.
    #[arg(long, global = true)]
    slabs: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log filter (`debug`, `tax_core=trace`...). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Advice backend (e.g. `groq`). Without it no advice is requested.
    #[arg(long, global = true)]
    advisor: Option<String>,

    /// Model name passed to the advice backend.
    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, default_value_t = 20, global = true)]
    advice_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute and compare both regimes for one profile.
    Calculate(ProfileArgs),

    /// Compute every profile in a CSV file.
    Batch {
        /// CSV with a `gross_annual_income` column and optional deduction columns.
        path: PathBuf,
    },

    /// Year-long tax plan built on top of the comparison.
    Strategy {
        #[command(flatten)]
        profile: ProfileArgs,

        #[arg(long, default_value_t = 30)]
        age: u32,

        /// conservative, moderate or aggressive.
        #[arg(long, default_value = "moderate", value_parser = risk_arg)]
        risk: RiskAppetite,
    },
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Gross annual income.
    #[arg(long, value_parser = rupees_arg)]
    income: Decimal,

    /// 80C investments (ELSS, PPF, life cover...).
    #[arg(long = "section-80c", default_value = "0", value_parser = rupees_arg)]
    section_80c: Decimal,

    /// Health insurance premium (80D).
    #[arg(long, default_value = "0", value_parser = rupees_arg)]
    health_insurance: Decimal,

    /// Home loan interest (24B).
    #[arg(long, default_value = "0", value_parser = rupees_arg)]
    home_loan_interest: Decimal,

    /// House rent allowance claimed.
    #[arg(long, default_value = "0", value_parser = rupees_arg)]
    hra: Decimal,
}

impl From<&ProfileArgs> for FinancialProfile {
    fn from(args: &ProfileArgs) -> Self {
        FinancialProfile {
            gross_annual_income: args.income,
            section_80c_contribution: args.section_80c,
            health_insurance_premium: args.health_insurance,
            home_loan_interest: args.home_loan_interest,
            hra_claimed: args.hra,
        }
    }
}

fn risk_arg(s: &str) -> Result<RiskAppetite, String> {
    RiskAppetite::parse(s).ok_or_else(|| {
        format!("unknown risk appetite '{s}', expected conservative, moderate or aggressive")
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = app::load_config(cli.rules.as_deref(), cli.slabs.as_deref())?;
    let engine = TaxLiabilityEngine::new(&config);
    debug!(assessment_year = %config.assessment_year, "rule tables ready");

    let registry = app::build_registry();
    let advisor = app::connect_advisor(
        &registry,
        cli.advisor.as_deref(),
        std::env::var(GROQ_API_KEY_VAR).ok(),
        cli.model.clone(),
    )
    .await;
    let timeout = Duration::from_secs(cli.advice_timeout_secs);

    let output = match &cli.command {
        Command::Calculate(args) => {
            let profile = FinancialProfile::from(args);
            let report = engine.calculate(&profile).context("tax calculation failed")?;
            let advised = advisor.advise_report(&profile, report, timeout).await;
            match cli.format {
                OutputFormat::Text => render::render_report(&advised),
                OutputFormat::Json => render::to_json(&advised)?,
            }
        }
        Command::Batch { path } => {
            if cli.advisor.is_some() {
                warn!("advice is not requested in batch mode");
            }
            let rows = profile_csv::load_from_file(path)
                .with_context(|| format!("failed to load profiles from '{}'", path.display()))?;
            let entries = batch::run_batch(&engine, rows);
            match cli.format {
                OutputFormat::Text => render::render_batch(&entries),
                OutputFormat::Json => render::to_json(&entries)?,
            }
        }
        Command::Strategy { profile, age, risk } => {
            let profile = FinancialProfile::from(profile);
            let personal = StrategyProfile {
                age: *age,
                risk_appetite: *risk,
            };
            let strategy = engine
                .strategy(&profile, &personal)
                .context("tax calculation failed")?;
            let advice = advisor.advise(&profile, &strategy.report, timeout).await;
            match cli.format {
                OutputFormat::Text => render::render_strategy(&strategy, &advice),
                OutputFormat::Json => render::to_json(&render::AdvisedStrategy {
                    strategy: &strategy,
                    advice: &advice,
                })?,
            }
        }
    };

    println!("{output}");
    Ok(())
}
