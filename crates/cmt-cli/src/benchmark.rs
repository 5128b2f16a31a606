use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Timing checkpoints, gated on `-b/--benchmark` (or `BENCHMARK=1`).
/// Written to stderr, and additionally appended to `BENCHMARK_PATH` if
/// that environment variable names a file.
pub struct Benchmark {
    enabled: bool,
    start: Instant,
    last: Instant,
    path: Option<PathBuf>,
}

impl Benchmark {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Benchmark {
            enabled,
            start: now,
            last: now,
            path: std::env::var_os("BENCHMARK_PATH").map(PathBuf::from),
        }
    }

    pub fn checkpoint(&mut self, label: &str) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        let line = format!(
            "[benchmark] {label}: {:?} (total {:?})",
            now.duration_since(self.last),
            now.duration_since(self.start)
        );
        eprintln!("{line}");
        self.last = now;
        if let Some(path) = &self.path {
            if let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{line}");
            }
        }
    }
}
