//! CLI entrypoint for agent-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    AgentRegistry, BackgroundDoc, CouncilOrchestrator, CouncilProgressNotifier, DebateManifest,
    InMemoryManifest, InitiateDebateInput, KnowledgeStore, NoKnowledge, NoProgress,
    ReasoningProvider, ScriptedAgent,
};
use council_domain::{CouncilId, OutputFormat, Perspective, Position};
use council_infrastructure::{
    ConfigLoader, DirectoryKnowledgeStore, FileConfig, JsonlManifest, OpenAiCompatibleProvider,
    OpenAiSettings,
};
use council_presentation::{
    Cli, ConsoleFormatter, DecisionRecord, OutputConfig, OutputFormatter, ProgressReporter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validated()? {
        warn!("{}", issue);
    }

    let output = OutputConfig::resolve(
        cli.output,
        config.output.format,
        config.output.color,
        config.output.show_progress,
        cli.quiet,
    );
    if !output.color {
        colored::control::set_override(false);
    }

    let manifest_dir = cli
        .manifest_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.manifest.dir));

    if let Some(id) = &cli.replay {
        return replay(&manifest_dir, id);
    }

    let Some(topic) = cli.topic.clone() else {
        bail!("A topic is required. Usage: council \"<decision to debate>\"");
    };

    let perspectives: Vec<Perspective> = if cli.perspectives.is_empty() {
        config.perspectives()
    } else {
        cli.perspectives.iter().map(|s| parse_perspective(s)).collect()
    };

    let background_docs = cli
        .background
        .iter()
        .map(|path| load_background(path))
        .collect::<Result<Vec<_>>>()?;

    // === Dependency Injection ===
    let registry = if cli.dry_run {
        info!("Dry run: using scripted agents");
        dry_run_registry(&config)
    } else {
        let settings = OpenAiSettings::from_config(&config.provider)
            .context("Reasoning provider is not configured (use --dry-run to debate without one)")?;
        let provider: Arc<dyn ReasoningProvider> = Arc::new(OpenAiCompatibleProvider::new(settings)?);
        info!("Using reasoning provider {}", provider.name());
        AgentRegistry::with_reasoning_agents(provider.clone())
            .with_reasoning_perspectives(provider, custom_perspectives(&config))
    };

    let manifest = open_manifest(&config, &manifest_dir);
    let knowledge: Arc<dyn KnowledgeStore> = match &config.knowledge.dir {
        Some(dir) => Arc::new(DirectoryKnowledgeStore::open(dir)),
        None => Arc::new(NoKnowledge),
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; aborting the council");
            on_interrupt.cancel();
        }
    });

    let params = config.council_params();
    let approval_threshold = params.approval_threshold;
    let orchestrator = CouncilOrchestrator::new(registry, manifest, params)
        .with_knowledge(knowledge)
        .with_cancellation(cancel);

    let input = InitiateDebateInput::new(topic, perspectives).with_background_docs(background_docs);

    let progress: Box<dyn CouncilProgressNotifier> = if output.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };
    let result = orchestrator
        .initiate_debate_with_progress(input, progress.as_ref())
        .await?;

    if let Some(path) = &cli.adr_out {
        let record = DecisionRecord::new(&result, approval_threshold).render();
        std::fs::write(path, record)
            .with_context(|| format!("Failed to write decision record to {}", path.display()))?;
        info!("Decision record written to {}", path.display());
    }

    let rendered = match output.format {
        OutputFormat::Adr => DecisionRecord::new(&result, approval_threshold).render(),
        format => ConsoleFormatter.render(&result, format),
    };
    println!("{}", rendered);

    if result.requires_human_approval(approval_threshold) {
        warn!(
            "Result needs human review ({} at {:.0}% confidence)",
            result.recommendation,
            result.confidence * 100.0
        );
    }

    Ok(())
}

/// Install the stderr logger plus an optional non-blocking file logger.
///
/// The returned guard must live until exit so buffered lines are flushed.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn parse_perspective(name: &str) -> Perspective {
    let Ok(perspective) = name.parse::<Perspective>();
    perspective
}

/// Custom perspectives named in the config are registered alongside the built-ins
fn custom_perspectives(config: &FileConfig) -> Vec<Perspective> {
    config
        .perspectives()
        .into_iter()
        .filter(|p| !p.is_builtin())
        .collect()
}

/// Scripted agents with fixed positions, for trying the pipeline offline
fn dry_run_registry(config: &FileConfig) -> AgentRegistry {
    const STANCES: [(Position, f64); 5] = [
        (Position::Support, 0.8),
        (Position::Support, 0.7),
        (Position::Oppose, 0.6),
        (Position::Neutral, 0.5),
        (Position::Support, 0.75),
    ];

    Perspective::builtins()
        .into_iter()
        .chain(custom_perspectives(config))
        .enumerate()
        .fold(AgentRegistry::new(), |registry, (index, perspective)| {
            let (position, confidence) = STANCES[index % STANCES.len()];
            registry.with_agent(perspective, Arc::new(ScriptedAgent::new(position, confidence)))
        })
}

fn open_manifest(config: &FileConfig, dir: &Path) -> Arc<dyn DebateManifest> {
    if config.manifest.enabled {
        if let Some(manifest) = JsonlManifest::new(dir) {
            info!("Recording manifests under {}", dir.display());
            return Arc::new(manifest);
        }
        warn!("Falling back to an in-memory manifest");
    }
    Arc::new(InMemoryManifest::new())
}

fn load_background(path: &Path) -> Result<BackgroundDoc> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read background document {}", path.display()))?;
    Ok(BackgroundDoc::new(path.display().to_string(), content))
}

fn replay(dir: &Path, id: &str) -> Result<()> {
    let Some(manifest) = JsonlManifest::new(dir) else {
        bail!("Manifest directory {} is not accessible", dir.display());
    };
    let council_id = CouncilId::from(id);
    let path = manifest.path_for(&council_id);
    if !path.exists() {
        let known = manifest.councils();
        if known.is_empty() {
            bail!("No manifests recorded under {}", dir.display());
        }
        let list = known
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("\n  ");
        bail!("No manifest for {}. Recorded councils:\n  {}", id, list);
    }

    let events = JsonlManifest::read_file(&path)?;
    print!("{}", ConsoleFormatter::format_timeline(&events));
    Ok(())
}
