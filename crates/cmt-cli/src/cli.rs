use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Discovers CMT files, builds the project's dependency graph, and
/// renders it as Graphviz DOT or fixed-schema JSON.
#[derive(Parser, Debug)]
#[command(name = "cmt-cli", version, about = "CMT dependency analyzer")]
pub struct Args {
    /// One or more CMT files or directories to search recursively.
    #[arg(required = true)]
    pub files_or_dirs: Vec<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Dot)]
    pub format: Format,

    /// Focus the rendered graph on a single module's immediate
    /// dependencies and dependents.
    #[arg(short, long, conflicts_with = "no_dependents")]
    pub module: Option<String>,

    /// Emit progress to stderr as files are discovered and extracted.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit timing checkpoints to stderr.
    #[arg(short, long)]
    pub benchmark: bool,

    /// Skip cache interaction entirely.
    #[arg(long)]
    pub no_cache: bool,

    /// Override the cache file path (default `.cmt-cache.bin`).
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Delete the cache file before running.
    #[arg(long)]
    pub clear_cache: bool,

    /// Print modules with no dependents instead of rendering a graph
    /// (mutually exclusive with `--module`).
    #[arg(long = "no-dependents", visible_alias = "nd")]
    pub no_dependents: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Dot,
    Json,
}

impl Args {
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(".cmt-cache.bin"))
    }

    /// `-b/--benchmark` with the `BENCHMARK=1`/`BENCHMARK_PATH` environment
    /// fallbacks folded in.
    pub fn benchmark_enabled(&self) -> bool {
        self.benchmark
            || std::env::var("BENCHMARK").as_deref() == Ok("1")
            || std::env::var_os("BENCHMARK_PATH").is_some()
    }

    /// `-v/--verbose` with the `VERBOSE=1` environment fallback folded in.
    pub fn verbose_enabled(&self) -> bool {
        self.verbose || std::env::var("VERBOSE").as_deref() == Ok("1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_input_is_required() {
        assert!(Args::try_parse_from(["cmt-cli"]).is_err());
        assert!(Args::try_parse_from(["cmt-cli", "src/"]).is_ok());
    }

    #[test]
    fn format_defaults_to_dot() {
        let args = Args::try_parse_from(["cmt-cli", "src/"]).unwrap();
        assert_eq!(args.format, Format::Dot);
    }

    #[test]
    fn module_and_no_dependents_are_mutually_exclusive() {
        let result = Args::try_parse_from(["cmt-cli", "src/", "-m", "App", "--no-dependents"]);
        assert!(result.is_err());
    }

    #[test]
    fn cache_path_falls_back_to_default() {
        let args = Args::try_parse_from(["cmt-cli", "src/"]).unwrap();
        assert_eq!(args.cache_path(), PathBuf::from(".cmt-cache.bin"));

        let args = Args::try_parse_from(["cmt-cli", "src/", "--cache-file", "custom.bin"]).unwrap();
        assert_eq!(args.cache_path(), PathBuf::from("custom.bin"));
    }
}
