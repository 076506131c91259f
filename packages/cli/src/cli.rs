//! Command-line interface for clause analysis.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use clausewise_assistant::{AssistantConfig, Embedder, LlmClient, OpenAiClient, QaEngine, Summarizer};
use clausewise_core::{resolve_rules_path, ContractAnalyzer, RiskKeywordTable, Segmenter};

use crate::error::Result;
use crate::output::{self, OutputFormat};
use crate::reader::read_document;

/// Clausewise - Split contracts into clauses and flag risky ones.
#[derive(Parser)]
#[command(name = "clausewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a contract into clauses and flag risk keywords.
    Analyze {
        /// Plain-text contract file
        file: PathBuf,

        /// Risk keyword table (default: $CLAUSEWISE_RULES or rules/risk_keywords.yaml)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only show clauses with at least one match
        #[arg(long)]
        risky_only: bool,
    },

    /// Split a contract into clauses.
    Clauses {
        /// Plain-text contract file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a risk keyword table.
    CheckRules {
        /// Keyword table (default: $CLAUSEWISE_RULES or rules/risk_keywords.yaml)
        path: Option<PathBuf>,
    },

    /// Summarize a contract with the configured LLM.
    Summarize {
        /// Plain-text contract file
        file: PathBuf,
    },

    /// Ask a question about a contract.
    Ask {
        /// Plain-text contract file
        file: PathBuf,

        /// The question
        question: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            rules,
            format,
            risky_only,
        } => analyze_command(&file, rules.as_deref(), format, risky_only),
        Commands::Clauses { file, format } => clauses_command(&file, format),
        Commands::CheckRules { path } => check_rules_command(path.as_deref()),
        Commands::Summarize { file } => summarize_command(&file),
        Commands::Ask { file, question } => ask_command(&file, &question),
    }
}

/// Execute the analyze command.
fn analyze_command(file: &Path, rules: Option<&Path>, format: OutputFormat, risky_only: bool) -> Result<()> {
    // Load the keyword table before reading the document so a bad
    // configuration is reported first.
    let analyzer = ContractAnalyzer::from_rules_path(resolve_rules_path(rules))?;
    let text = read_document(file)?;
    let analysis = analyzer.analyze(&text);

    match format {
        OutputFormat::Text => print!("{}", output::render_analysis_text(&analysis, risky_only)),
        OutputFormat::Json => println!("{}", output::render_analysis_json(&analysis, risky_only)?),
    }
    Ok(())
}

/// Execute the clauses command.
fn clauses_command(file: &Path, format: OutputFormat) -> Result<()> {
    let text = read_document(file)?;
    let clauses = Segmenter::default().segment(&text);

    match format {
        OutputFormat::Text => print!("{}", output::render_clauses_text(&clauses)),
        OutputFormat::Json => println!("{}", output::render_clauses_json(&clauses)?),
    }
    Ok(())
}

/// Execute the check-rules command.
fn check_rules_command(path: Option<&Path>) -> Result<()> {
    let path = resolve_rules_path(path);
    let table = RiskKeywordTable::from_path(&path)?;

    println!("{} {}", style("Valid keyword table:").green().bold(), path.display());
    print!("{}", output::render_table_summary(&table));
    Ok(())
}

/// Execute the summarize command.
fn summarize_command(file: &Path) -> Result<()> {
    let config = AssistantConfig::from_env();
    let client = OpenAiClient::new(&config)?;
    let text = read_document(file)?;

    let pb = spinner("Summarizing...");
    let summary = runtime()?.block_on(Summarizer::new(&client, &config).summarize_document(&text));
    pb.finish_and_clear();

    println!("{}", style("Summary").bold());
    println!("{summary}");
    Ok(())
}

/// Execute the ask command.
fn ask_command(file: &Path, question: &str) -> Result<()> {
    let config = AssistantConfig::from_env();
    let client = if config.llm_enabled() {
        Some(OpenAiClient::new(&config)?)
    } else {
        tracing::warn!("OPENAI_API_KEY not set, no LLM available");
        None
    };
    let text = read_document(file)?;
    let clauses = Segmenter::default().segment(&text);

    let llm = client.as_ref().map(|c| c as &dyn LlmClient);
    let embedder = client.as_ref().map(|c| c as &dyn Embedder);
    let engine = QaEngine::new(llm, embedder, &config);

    let pb = spinner("Thinking...");
    let answer = runtime()?.block_on(engine.answer(question, &text, &clauses));
    pb.finish_and_clear();

    println!("{answer}");
    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread().enable_all().build()?)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
