mod config;
mod decl_index;
mod engine;
mod generics;
mod loader;
mod model;
mod rules;
#[cfg(test)]
mod test_harness;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use serde_sarif::sarif::{
    Artifact, Invocation, PropertyBag, Run, SCHEMA_URL, Sarif, Tool, ToolComponent,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AnalysisConfig;
use crate::decl_index::build_decl_index;
use crate::engine::{Engine, build_context};
use crate::loader::load_inputs;

/// CLI arguments for nullspect execution.
#[derive(Parser, Debug)]
#[command(
    name = "nullspect",
    about = "Deterministic SARIF output for generic-type nullability checks over type model dumps.",
    version
)]
struct Cli {
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    timing: bool,
    /// Gates every generics check; disabling turns the run into a no-op.
    #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    strict_generics: bool,
    /// Annotation names treated as the nullable marker; replaces the
    /// JSpecify defaults when given.
    #[arg(long = "nullable-annotation", value_name = "NAME")]
    nullable_annotations: Vec<String>,
    /// Package prefixes considered annotated code; empty means all.
    #[arg(long = "annotated-package", value_name = "PREFIX")]
    annotated_packages: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    run(cli)
}

fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.exists() {
        anyhow::bail!("input not found: {}", cli.input.display());
    }

    let config = AnalysisConfig::from_cli(
        cli.strict_generics,
        &cli.nullable_annotations,
        &cli.annotated_packages,
    );

    let started_at = Instant::now();
    let load_started_at = Instant::now();
    let loaded = load_inputs(&cli.input)?;
    let load_duration_ms = load_started_at.elapsed().as_millis();

    let unit_count = loaded.units.len();
    let artifact_count = loaded.artifacts.len();
    let declarations = build_decl_index(&loaded.units)?;
    let declaration_count = declarations.len();

    let invocation_stats = InvocationStats {
        load_duration_ms,
        unit_count,
        artifact_count,
        declaration_count,
    };
    let context = build_context(loaded.units, declarations, config, &loaded.artifacts);
    let engine = Engine::new();
    let output = engine.analyze(context)?;

    let invocation = build_invocation(&invocation_stats);
    let sarif = build_sarif(loaded.artifacts, invocation, output.rules, output.results);

    let mut writer = output_writer(cli.output.as_deref())?;
    serde_json::to_writer_pretty(&mut writer, &sarif)
        .context("failed to serialize SARIF output")?;
    writer
        .write_all(b"\n")
        .context("failed to write SARIF output")?;

    if cli.timing && !cli.quiet {
        eprintln!(
            "timing: total_ms={} load_ms={} units={} declarations={}",
            started_at.elapsed().as_millis(),
            load_duration_ms,
            unit_count,
            declaration_count
        );
    }

    Ok(())
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdout())),
        Some(path) => Ok(Box::new(
            File::create(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Ok(Box::new(io::stdout())),
    }
}

/// Metadata captured for SARIF invocation properties.
struct InvocationStats {
    load_duration_ms: u128,
    unit_count: usize,
    artifact_count: usize,
    declaration_count: usize,
}

fn build_invocation(stats: &InvocationStats) -> Invocation {
    let arguments: Vec<String> = std::env::args().collect();
    let command_line = arguments.join(" ");
    let mut properties = BTreeMap::new();
    properties.insert(
        "nullspect.load_ms".to_string(),
        json!(stats.load_duration_ms),
    );
    properties.insert("nullspect.unit_count".to_string(), json!(stats.unit_count));
    properties.insert(
        "nullspect.artifact_count".to_string(),
        json!(stats.artifact_count),
    );
    properties.insert(
        "nullspect.declaration_count".to_string(),
        json!(stats.declaration_count),
    );

    Invocation::builder()
        .execution_successful(true)
        .arguments(arguments)
        .command_line(command_line)
        .properties(
            PropertyBag::builder()
                .additional_properties(properties)
                .build(),
        )
        .build()
}

fn build_sarif(
    artifacts: Vec<Artifact>,
    invocation: Invocation,
    rules: Vec<serde_sarif::sarif::ReportingDescriptor>,
    results: Vec<serde_sarif::sarif::Result>,
) -> Sarif {
    let driver = if rules.is_empty() {
        ToolComponent::builder()
            .name("nullspect")
            .information_uri("https://github.com/exoego/nullspect")
            .build()
    } else {
        ToolComponent::builder()
            .name("nullspect")
            .information_uri("https://github.com/exoego/nullspect")
            .rules(rules)
            .build()
    };
    let tool = Tool {
        driver,
        extensions: None,
        properties: None,
    };
    let run = if artifacts.is_empty() {
        Run::builder()
            .tool(tool)
            .invocations(vec![invocation])
            .results(results)
            .build()
    } else {
        Run::builder()
            .tool(tool)
            .invocations(vec![invocation])
            .results(results)
            .artifacts(artifacts)
            .build()
    };

    Sarif::builder()
        .schema(SCHEMA_URL)
        .runs(vec![run])
        .version(json!("2.1.0"))
        .build()
}
