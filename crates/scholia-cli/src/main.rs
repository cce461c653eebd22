use anyhow::Context;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::mpsc;

use scholia_cli::{
    config::AppConfig,
    logging::init_logging,
    progress::StageProgress,
};
use scholia_llm::ProviderConfig;
use scholia_pipeline::{SummarizeInput, Summarizer, SummarizerConfig, SummaryOutcome, TrackingStatus};

/// Generate a structured study summary from a PDF reading.
///
/// The course and week are read from the folder layout
/// (e.g. `PSYCH101/Week3/article.pdf`), and summaries of earlier readings in
/// the same course are fed back in so each week builds on the last.
#[derive(Parser, Debug)]
#[command(name = "scholia", version, about, long_about)]
struct Cli {
    /// PDF file to summarize
    pdf: PathBuf,

    /// Output file path (default: `<name>_summary.md` next to the PDF)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Override course code detection
    #[arg(short, long)]
    course: Option<String>,

    /// Override week detection
    #[arg(short, long)]
    week: Option<String>,

    /// Skip context from previous summaries
    #[arg(long)]
    no_history: bool,

    /// Debug logging on stderr instead of the progress spinner
    #[arg(short, long)]
    verbose: bool,

    /// Additional configuration file, applied after the default locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging, cli.verbose)?;

    tracing::info!(model = %config.llm.model, "Starting scholia");

    let mut provider = ProviderConfig::openrouter(config.openrouter_api_key.clone());
    if let Some(base_url) = &config.llm.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    let summarizer = Summarizer::builder()
        .config(SummarizerConfig::from(&config))
        .provider(provider)
        .build()?;

    let input = build_input(&cli);

    if !cli.verbose {
        eprintln!(
            "{}",
            style(format!("Summarizing {}", cli.pdf.display())).cyan().bold()
        );
    }

    let progress = StageProgress::new(!cli.verbose);
    let (tx, rx) = mpsc::unbounded_channel();
    let watcher = tokio::spawn(progress.clone().follow(rx));

    let result = tokio::select! {
        result = summarizer.run_with_events(input, Some(tx)) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            progress.finish();
            eprintln!("\n{}", style("Operation cancelled by user").yellow());
            return Ok(ExitCode::from(130));
        }
    };

    let _ = watcher.await;
    progress.finish();

    let outcome = result?;
    print_outcome(&outcome, &config);
    Ok(ExitCode::SUCCESS)
}

fn build_input(cli: &Cli) -> SummarizeInput {
    let mut input = SummarizeInput::new(&cli.pdf);
    if let Some(output) = &cli.output {
        input = input.with_output(output);
    }
    if let Some(course) = &cli.course {
        input = input.with_course(course.clone());
    }
    if let Some(week) = &cli.week {
        input = input.with_week(week.clone());
    }
    if cli.no_history {
        input = input.with_history(false);
    }
    input
}

fn print_outcome(outcome: &SummaryOutcome, config: &AppConfig) {
    let context = &outcome.context;

    println!("\n{}", style("✓ Summary generated successfully!").green().bold());
    println!("\n{} {}", style("Summary saved to:").cyan(), outcome.summary_path.display());
    println!(
        "{} {} | Week {} | {} previous summaries used",
        style("Context:").cyan(),
        context.course_code.as_deref().unwrap_or("unknown course"),
        context.week.as_deref().unwrap_or("?"),
        outcome.previous_summaries.len()
    );

    match &outcome.tracking {
        TrackingStatus::Updated(report) => {
            println!("\n{}", style("Tracking documents updated:").cyan());
            println!(
                "  • Course: {} ({} readings)",
                report.course_document.display(),
                report.course_readings
            );
            println!(
                "  • Global: {} ({} courses, {} readings)",
                report.global_document.display(),
                report.total_courses,
                report.total_readings
            );
        }
        TrackingStatus::Skipped(reason) => {
            println!("\n{} {}", style("Tracking skipped:").dim(), reason);
        }
        TrackingStatus::Failed(e) => {
            println!("\n{} {}", style("Warning: tracking documents not updated:").yellow(), e);
        }
    }

    println!("\n{}", style(format!("Model: {} | run {}", config.llm.model, outcome.run_id)).dim());
}
