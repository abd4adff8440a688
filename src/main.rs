use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sagaflow_codegen::Emitter;
use sagaflow_diagram::Diagram;
use sagaflow_resolver::Strictness;
use sagaflow_validator::{Validator, Verdict};

mod config;

use config::CompilerConfig;

/// Sagaflow - compiles BPMN process diagrams into orchestration programs
#[derive(Parser)]
#[command(name = "sagaflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON compiler config file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Reject dangling flows and missing annotations instead of dropping them
  #[arg(long, global = true)]
  strict: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate a diagram and print the verdict as JSON
  Check {
    /// Path to the BPMN diagram
    diagram_file: PathBuf,
  },

  /// Compile a diagram into an orchestration program
  Compile {
    /// Path to the BPMN diagram
    diagram_file: PathBuf,

    /// Write the program here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip validation and emit directly from the diagram
    #[arg(long)]
    unchecked: bool,
  },
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let mut config = CompilerConfig::load(cli.config.as_deref())?;
  if cli.strict {
    config.resolve.strictness = Strictness::Strict;
  }

  match cli.command {
    Some(Commands::Check { diagram_file }) => check(&diagram_file, &config),
    Some(Commands::Compile {
      diagram_file,
      output,
      unchecked,
    }) => compile(&diagram_file, output.as_deref(), unchecked, &config),
    None => {
      println!("sagaflow - use --help to see available commands");
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn load_diagram(diagram_file: &Path) -> Result<Diagram> {
  let content = std::fs::read_to_string(diagram_file)
    .with_context(|| format!("failed to read diagram file: {}", diagram_file.display()))?;

  let diagram = Diagram::from_xml(&content)
    .with_context(|| format!("failed to parse diagram file: {}", diagram_file.display()))?;
  debug!(nodes = diagram.process.node_count(), "diagram loaded");

  Ok(diagram)
}

fn check(diagram_file: &Path, config: &CompilerConfig) -> Result<ExitCode> {
  let diagram = load_diagram(diagram_file)?;
  let verdict = Validator::new(config.resolve.clone()).check(&diagram);

  println!("{}", serde_json::to_string_pretty(&verdict)?);

  Ok(exit_code(&verdict))
}

fn compile(
  diagram_file: &Path,
  output: Option<&Path>,
  unchecked: bool,
  config: &CompilerConfig,
) -> Result<ExitCode> {
  let diagram = load_diagram(diagram_file)?;
  let emitter = Emitter::with_resolve_options(config.emit.clone(), config.resolve.clone());

  let program = if unchecked {
    emitter.emit_diagram(&diagram)
  } else {
    match Validator::new(config.resolve.clone()).validate(&diagram) {
      Ok(validated) => emitter.emit(&validated),
      Err(rejection) => {
        let verdict = Verdict::from(Err::<(), _>(rejection));
        eprintln!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(exit_code(&verdict));
      }
    }
  };

  if program.is_empty() {
    eprintln!("Nothing emitted: the diagram needs exactly one start event");
    return Ok(ExitCode::FAILURE);
  }

  match output {
    Some(path) => {
      std::fs::write(path, &program)
        .with_context(|| format!("failed to write program: {}", path.display()))?;
      info!(path = %path.display(), bytes = program.len(), "program written");
    }
    None => print!("{program}"),
  }

  Ok(ExitCode::SUCCESS)
}

fn exit_code(verdict: &Verdict) -> ExitCode {
  if verdict.outcome {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}
