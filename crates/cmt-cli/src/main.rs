mod benchmark;
mod cli;
mod progress;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cmt_core::{DependencyGraph, ModuleName, MockCmtDecoder};
use cmt_ingest::{Cache, ExtractConfig, FileCache};

use benchmark::Benchmark;
use cli::{Args, Format};
use progress::VerboseProgress;

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Unknown options, missing positional inputs, and conflicting
            // flags are all reported here; exit 1 matches every other
            // fatal-error path. `--help` and `--version` still exit 0.
            eprint!("{err}");
            return if err.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let mut bench = Benchmark::new(args.benchmark_enabled());

    if args.clear_cache {
        if let Err(err) = FileCache::clear(&args.cache_path()) {
            error!(error = %err, "failed to clear cache file");
            return ExitCode::FAILURE;
        }
    }

    let cache: Option<Arc<dyn Cache>> = if args.no_cache {
        None
    } else {
        Some(Arc::new(FileCache::load(args.cache_path())) as Arc<dyn Cache>)
    };
    let config = ExtractConfig {
        cache,
        ..ExtractConfig::default()
    };

    // The real CMT binary-format reader is out of scope (see DESIGN.md);
    // an empty `MockCmtDecoder` here means every discovered file decodes
    // as a recoverable error, synthesizing an empty `ModuleInfo` rather
    // than aborting the run. Embedders with a real decoder link this
    // binary's pieces (`cmt-ingest`, `cmt-graph`, `cmt-render`) directly
    // instead of going through this `main`.
    let decoder = MockCmtDecoder::new();
    let progress = VerboseProgress {
        enabled: args.verbose_enabled(),
    };

    let infos = cmt_ingest::discover_and_extract(&args.files_or_dirs, &decoder, &config, &progress);
    bench.checkpoint("discovery and extraction");
    info!(modules = infos.len(), "extracted module inventory");

    let graph = cmt_graph::build(&infos);
    bench.checkpoint("graph built");

    if args.no_dependents {
        let report = cmt_graph::find_modules_with_no_dependents(&graph)
            .into_iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return write_output(args, &report);
    }

    let rendered = match &args.module {
        Some(raw) => {
            // An unparseable or unknown `--module` is surfaced as an
            // empty focused graph, not a fatal error.
            let focused = ModuleName::parse(raw)
                .map(|name| cmt_graph::create_focused_graph(&graph, &name))
                .unwrap_or_else(|_| DependencyGraph::new());
            render(&focused, args.format)
        }
        None => render(&graph, args.format),
    };
    bench.checkpoint("rendered");

    match rendered {
        Ok(text) => write_output(args, &text),
        Err(err) => {
            error!(error = %err, "failed to render output");
            ExitCode::FAILURE
        }
    }
}

fn render(graph: &DependencyGraph, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Dot => Ok(cmt_render::render_dot(graph)),
        Format::Json => cmt_render::render_json(graph),
    }
}

fn write_output(args: &Args, text: &str) -> ExitCode {
    match &args.output {
        Some(path) => match std::fs::write(path, text) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to write output file");
                ExitCode::FAILURE
            }
        },
        None => match writeln!(std::io::stdout(), "{text}") {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
