//! Runs task binaries repeatedly and summarizes how long they take.
//!
//! Two metrics are collected per run:
//! * RTET, the real-time execution time of the whole launch, measured by the
//!   driver around the spawned process
//! * MPCT, the maximum cpu time over all ranks, parsed from the
//!   `cputime:` lines the ranks print
use crate::cputime;
use crate::error::BenchError;
use crate::task::{Launch, Task};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, warn};

/// launchers tried in order by `Launcher::detect`
const LAUNCHERS: [&str; 2] = ["mpirun", "mpiexec"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Rtet,
    Mpct,
}

impl FromStr for Metric {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rtet" => Ok(Metric::Rtet),
            "mpct" => Ok(Metric::Mpct),
            _ => Err(BenchError::UnknownMetric(s.to_string())),
        }
    }
}

/// The parallel process launcher found on the system
#[derive(Debug, Clone)]
pub struct Launcher {
    pub program: String,
}

impl Launcher {
    pub fn new(program: &str) -> Self {
        Launcher {
            program: program.to_string(),
        }
    }

    /// Returns the first of `mpirun` and `mpiexec` that can be started.
    pub fn detect() -> Result<Self, BenchError> {
        Launcher::detect_from(&LAUNCHERS)
    }

    /// Returns the first of `candidates` that can be started.
    pub fn detect_from(candidates: &[&str]) -> Result<Self, BenchError> {
        candidates
            .iter()
            .find(|program| {
                Command::new(program)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .is_ok()
            })
            .map(|program| Launcher::new(program))
            .ok_or(BenchError::LauncherNotFound)
    }

    /// Command that starts `task` on `np` processes.
    pub fn command(&self, task: &Task, bin_dir: &Path, np: usize) -> Command {
        let exe = binary_path(bin_dir, task);
        match task.launch {
            Launch::Mpi => {
                let mut cmd = Command::new(&self.program);
                cmd.arg("-n").arg(np.to_string()).arg(exe);
                cmd
            }
            Launch::Serial => Command::new(exe),
        }
    }
}

pub fn binary_path(bin_dir: &Path, task: &Task) -> PathBuf {
    bin_dir.join(format!("{}{}", task.binary, std::env::consts::EXE_SUFFIX))
}

/// Outcome of a single launch
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    /// seconds of wall time
    pub rtet: f64,
    /// seconds of cpu time of the slowest rank, if every rank reported one
    pub mpct: Option<f64>,
    pub result: Option<String>,
}

/// Launches `task` once and waits for it to finish.
pub fn run_once(
    launcher: &Launcher,
    task: &Task,
    bin_dir: &Path,
    np: usize,
) -> Result<Sample, BenchError> {
    let mut cmd = launcher.command(task, bin_dir, np);
    debug!("spawning {:?}", cmd);

    let start = Instant::now();
    let output = cmd.output().map_err(|source| BenchError::Spawn {
        program: format!("{:?}", cmd.get_program()),
        source,
    })?;
    let rtet = start.elapsed().as_secs_f64();

    if !output.status.success() {
        return Err(BenchError::TaskFailed {
            task: task.alias.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ranks = match task.launch {
        Launch::Mpi => np,
        Launch::Serial => 1,
    };
    let result = result_line(&stdout).map(|line| line.to_string());
    match &result {
        Some(line) if !task.expected.matches(line) => {
            warn!("{} printed unexpected result {:?}", task.alias, line)
        }
        None => warn!("{} printed no result line", task.alias),
        _ => {}
    }

    Ok(Sample {
        rtet,
        mpct: parse_max_cputime(&stdout, ranks),
        result,
    })
}

/// Max of the reported cpu times, or `None` unless at least `np` ranks
/// reported one.
pub fn parse_max_cputime(stdout: &str, np: usize) -> Option<f64> {
    let times: Vec<f64> = stdout.lines().filter_map(cputime::parse_line).collect();
    if times.is_empty() || times.len() < np {
        return None;
    }
    Some(times.into_iter().fold(f64::NEG_INFINITY, f64::max))
}

/// First non-blank line that is not a cpu time report.
pub fn result_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && cputime::parse_line(line).is_none())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for s in samples {
            min = min.min(*s);
            max = max.max(*s);
            sum += s;
        }
        Some(Stats {
            min,
            max,
            avg: sum / samples.len() as f64,
        })
    }
}

/// Percent of time saved relative to `baseline`, positive when faster.
pub fn speedup(baseline: f64, avg: f64) -> f64 {
    (baseline - avg) * 100.0 / baseline
}

/// Statistics of every iteration at one process count
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub np: usize,
    pub rtet: Stats,
    /// `None` if some iteration failed to report its cpu times
    pub mpct: Option<Stats>,
    /// RTET and MPCT speedups against the first process count
    pub rtet_speedup: Option<f64>,
    pub mpct_speedup: Option<f64>,
    pub result: Option<String>,
}

impl RunReport {
    pub fn from_samples(np: usize, samples: &[Sample]) -> Option<Self> {
        let rtets: Vec<f64> = samples.iter().map(|s| s.rtet).collect();
        let mpcts: Option<Vec<f64>> = samples.iter().map(|s| s.mpct).collect();
        Some(RunReport {
            np,
            rtet: Stats::from_samples(&rtets)?,
            mpct: mpcts.as_deref().and_then(Stats::from_samples),
            rtet_speedup: None,
            mpct_speedup: None,
            result: samples.last().and_then(|s| s.result.clone()),
        })
    }

    /// Fills in the speedups against `baseline`.
    pub fn compare(&mut self, baseline: &RunReport) {
        self.rtet_speedup = Some(speedup(baseline.rtet.avg, self.rtet.avg));
        self.mpct_speedup = match (&baseline.mpct, &self.mpct) {
            (Some(b), Some(s)) => Some(speedup(b.avg, s.avg)),
            _ => None,
        };
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub task: Task,
    pub runs: Vec<RunReport>,
    /// metrics that could be reported for every run
    pub metrics: Vec<Metric>,
}

impl TaskReport {
    pub fn new(task: Task, metrics: &[Metric]) -> Self {
        TaskReport {
            task,
            runs: Vec::new(),
            metrics: metrics.to_vec(),
        }
    }

    /// Records a run, comparing it against the first one.
    ///
    /// MPCT is dropped from `metrics` as soon as one run lacks it.
    pub fn push(&mut self, mut run: RunReport) {
        if let Some(baseline) = self.runs.first() {
            run.compare(baseline);
        }
        if run.mpct.is_none() {
            self.metrics.retain(|m| *m != Metric::Mpct);
        }
        self.runs.push(run);
    }

    /// `true` if MPCT was requested but could not be parsed
    pub fn mpct_parse_error(&self, requested: &[Metric]) -> bool {
        requested.contains(&Metric::Mpct) && !self.metrics.contains(&Metric::Mpct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::find;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    const OUTPUT: &str = "cputime:0.500000\n3.142\ncputime:1.250000\ncputime:0.750000\n";

    #[test]
    fn test_parse_max_cputime() {
        assert_eq!(parse_max_cputime(OUTPUT, 3), Some(1.25));
        assert_eq!(parse_max_cputime(OUTPUT, 4), None);
        assert_eq!(parse_max_cputime("3.142\n", 1), None);
    }

    #[test]
    fn test_result_line() {
        assert_eq!(result_line(OUTPUT), Some("3.142"));
        assert_eq!(result_line("cputime:1.0\n\n"), None);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("RTET".parse::<Metric>().unwrap(), Metric::Rtet);
        assert_eq!("mpct".parse::<Metric>().unwrap(), Metric::Mpct);
        assert!("wall".parse::<Metric>().is_err());
    }

    #[test]
    fn test_stats() {
        let stats = Stats::from_samples(&[2.0, 1.0, 3.0]).unwrap();
        assert_eq!(stats, Stats { min: 1.0, max: 3.0, avg: 2.0 });
        assert!(Stats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_speedup() {
        assert_eq!(speedup(4.0, 2.0), 50.0);
        assert!(speedup(2.0, 4.0) < 0.0);
    }

    fn sample(rtet: f64, mpct: Option<f64>) -> Sample {
        Sample {
            rtet,
            mpct,
            result: Some("664579".to_string()),
        }
    }

    #[test]
    fn test_task_report_drops_mpct() {
        let task = *find("primes").unwrap();
        let requested = [Metric::Rtet, Metric::Mpct];
        let mut report = TaskReport::new(task, &requested);

        report.push(RunReport::from_samples(1, &[sample(4.0, Some(3.0))]).unwrap());
        report.push(RunReport::from_samples(2, &[sample(2.0, Some(1.5))]).unwrap());
        assert_eq!(report.runs[1].rtet_speedup, Some(50.0));
        assert_eq!(report.runs[1].mpct_speedup, Some(50.0));
        assert!(!report.mpct_parse_error(&requested));

        report.push(
            RunReport::from_samples(4, &[sample(1.0, None), sample(1.0, Some(1.0))]).unwrap(),
        );
        assert!(report.runs[2].mpct.is_none());
        assert_eq!(report.runs[2].mpct_speedup, None);
        assert!(report.mpct_parse_error(&requested));
    }

    #[test]
    fn test_serial_command() {
        let launcher = Launcher::new("mpirun");
        let task = find("pi-series-serial").unwrap();
        let cmd = launcher.command(task, Path::new("/opt/bench"), 4);
        assert_eq!(cmd.get_args().count(), 0);

        let task = find("pi").unwrap();
        let cmd = launcher.command(task, Path::new("/opt/bench"), 4);
        assert_eq!(cmd.get_program(), "mpirun");
        assert_eq!(cmd.get_args().nth(1).unwrap(), "4");
    }

    /// Fresh directory holding a `pi_series_serial` script with `body`
    fn script_dir(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mpi_bench-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("pi_series_serial");
        fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        dir
    }

    #[test]
    fn test_detect_from() {
        let launcher = Launcher::detect_from(&["no-such-launcher", "true"]).unwrap();
        assert_eq!(launcher.program, "true");
        assert!(matches!(
            Launcher::detect_from(&["no-such-launcher"]),
            Err(BenchError::LauncherNotFound)
        ));
    }

    #[test]
    fn test_run_once_parses_output() {
        let dir = script_dir("ok", "echo 3.141593\necho cputime:0.250000");
        let task = find("pi-series-serial").unwrap();
        let sample = run_once(&Launcher::new("mpirun"), task, &dir, 4).unwrap();
        assert_eq!(sample.result.as_deref(), Some("3.141593"));
        assert_eq!(sample.mpct, Some(0.25));
        assert!(sample.rtet >= 0.0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_once_nonzero_exit() {
        let dir = script_dir("fail", "echo boom >&2\nexit 1");
        let task = find("pi-series-serial").unwrap();
        match run_once(&Launcher::new("mpirun"), task, &dir, 1) {
            Err(BenchError::TaskFailed { task, status, stderr }) => {
                assert_eq!(task, "pi-series-serial");
                assert_eq!(status.code(), Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected TaskFailed, got {:?}", other),
        }
        fs::remove_dir_all(&dir).unwrap();

        // a launcher that always fails
        let task = find("pi").unwrap();
        let result = run_once(&Launcher::new("false"), task, Path::new("/opt/bench"), 2);
        assert!(matches!(result, Err(BenchError::TaskFailed { .. })));
    }

    #[test]
    fn test_run_once_missing_binary() {
        let task = find("pi-series-serial").unwrap();
        let bin_dir = Path::new("/nonexistent/mpi_bench/bin");
        let result = run_once(&Launcher::new("mpirun"), task, bin_dir, 1);
        assert!(matches!(result, Err(BenchError::Spawn { .. })));
    }
}
