//! HandoverX - structured handover reports from free-text notes.
//!
//! Terminal front-end for the handover workflow: reads a note, asks the
//! follow-up questions the engine raises, and prints the final report.

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use handoverx::engine::report;
use handoverx::{Config, Context, ContextProfile, OutputFormat, PacingConfig, Stage, WorkflowRunner};

/// Turn free-text handover notes into structured handover reports
#[derive(Parser)]
#[command(name = "handoverx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a specific config file
    #[arg(long, global = true, env = "HANDOVERX_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available handover contexts
    Contexts {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Analyze a handover note
    Analyze {
        /// Handover context (healthcare, workplace, student, general)
        #[arg(short, long)]
        context: Option<Context>,

        /// Note text (reads stdin when neither --text nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the note from a file
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Run the workflow on the built-in healthcare sample
    Demo {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show the effective configuration
    Config {
        /// Print the config file path instead
        #[arg(long, conflicts_with = "init")]
        path: bool,

        /// Write the effective configuration to the global config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Answer a follow-up question (ID=TEXT, repeatable)
    #[arg(short, long = "answer", value_parser = parse_answer)]
    answers: Vec<(String, String)>,

    /// Skip follow-up questions and report the initial analysis
    #[arg(long, conflicts_with_all = ["answers", "interactive"])]
    skip: bool,

    /// Prompt for each follow-up question on stdin
    #[arg(short, long)]
    interactive: bool,

    /// Report format (text, markdown, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Disable pacing delays
    #[arg(long)]
    no_delay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Contexts { format } => cmd_contexts(&format)?,
        Commands::Analyze { context, text, file, session } => {
            if session.interactive && text.is_none() && file.is_none() {
                bail!("--interactive needs the note from --text or --file, stdin is used for answers");
            }
            let note = read_note(text, file)?;
            cmd_analyze(&config, context, note, &session)?;
        }
        Commands::Demo { session } => cmd_demo(&config, &session)?,
        Commands::Config { path, init } => cmd_config(&config, path, init)?,
    }

    Ok(())
}

/// Context entry for JSON listing.
#[derive(Serialize)]
struct ContextEntry {
    key: Context,
    #[serde(flatten)]
    profile: ContextProfile,
}

/// List contexts.
fn cmd_contexts(format: &str) -> Result<()> {
    match format {
        "json" => {
            let entries: Vec<_> = Context::ALL
                .into_iter()
                .map(|key| ContextEntry { key, profile: key.profile() })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            for ctx in Context::ALL {
                let profile = ctx.profile();
                println!("{:<11} {} - {}", ctx.key(), profile.label, profile.description);
            }
        }
    }
    Ok(())
}

/// Analyze a note.
fn cmd_analyze(
    config: &Config,
    context: Option<Context>,
    note: String,
    args: &SessionArgs,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let mut runner = runner_for(config, args);
        if let Some(context) = context {
            runner.select_context(context)?;
        }
        runner.set_submission_text(note)?;

        run_session(&mut runner, config, args).await
    })
}

/// Analyze the healthcare sample note.
fn cmd_demo(config: &Config, args: &SessionArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let mut runner = runner_for(config, args);
        runner.load_demo()?;
        eprintln!("Demo note:\n  {}\n", runner.snapshot().text);

        run_session(&mut runner, config, args).await
    })
}

/// Print the configuration.
fn cmd_config(config: &Config, path: bool, init: bool) -> Result<()> {
    if path || init {
        let dir = Config::config_dir().context("Could not determine config directory")?;
        if init {
            config.save()?;
            eprintln!("Wrote configuration to:");
        }
        println!("{}", dir.join("config.toml").display());
    } else {
        print!("{}", config.to_toml_string()?);
    }
    Ok(())
}

fn runner_for(config: &Config, args: &SessionArgs) -> WorkflowRunner {
    let mut config = config.clone();
    if args.no_delay {
        config.pacing = PacingConfig::instant();
    }
    WorkflowRunner::from_config(&config)
}

/// Drive a prepared session to the summary and print the report.
async fn run_session(runner: &mut WorkflowRunner, config: &Config, args: &SessionArgs) -> Result<()> {
    let prepared = runner.snapshot();
    if !prepared.can_start() {
        bail!("The handover note is empty, nothing to analyze");
    }

    eprintln!(
        "Analyzing {} handover ({} chars)...",
        prepared.context.label(),
        prepared.text_len()
    );
    runner.start_analysis()?;

    if runner.settle().await? == Stage::FollowUp {
        let questions = runner.snapshot().questions;

        if args.skip {
            runner.skip_questions()?;
        } else {
            for (id, answer) in &args.answers {
                runner.set_answer(id, answer.as_str())?;
            }

            if args.interactive {
                let stdin = io::stdin();
                let mut lines = stdin.lock().lines();
                for question in &questions {
                    eprint!("[{}] {} ({}): ", question.id, question.question, question.category);
                    io::stderr().flush()?;
                    match lines.next() {
                        Some(line) => runner.set_answer(&question.id, line?)?,
                        None => break,
                    }
                }
            } else if args.answers.is_empty() {
                eprintln!("Follow-up questions (answer with --answer ID=TEXT):");
                for question in &questions {
                    eprintln!("  {} [{}] {}", question.id, question.category, question.question);
                }
            }

            runner.complete_analysis()?;
            eprintln!("Generating report...");
            runner.settle().await?;
        }
    } else if !args.answers.is_empty() {
        eprintln!("No follow-up questions were raised; ignoring --answer values");
    }

    let snapshot = runner.snapshot();
    let analysis = snapshot.analysis.as_ref().context("No analysis was produced")?;
    let format = args.format.unwrap_or(config.output.format);

    println!("{}", report::render(analysis, snapshot.context, format)?);
    Ok(())
}

/// Read the note from --text, --file, or stdin.
fn read_note(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_answer(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, text)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), text.to_string()))
        }
        _ => Err(format!("expected ID=TEXT, got '{raw}'")),
    }
}
