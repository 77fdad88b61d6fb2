use std::io;
use std::process::ExitStatus;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BenchError {
    #[error("message passing runtime already initialized")]
    AlreadyInitialized,
    #[error("cannot split work across zero processes")]
    NoProcesses,
    #[error("interval start {start} is past its end {end}")]
    InvalidInterval { start: u64, end: u64 },
    #[error("rank {rank} is outside a group of {size}")]
    InvalidRank { rank: usize, size: usize },
    #[error("expected {expected} intervals, got {actual}")]
    PartitionMismatch { expected: usize, actual: usize },
    #[error("failed to read process cpu time")]
    CpuTime(#[source] io::Error),
    #[error("no mpirun or mpiexec found on PATH")]
    LauncherNotFound,
    #[error("unknown task {0:?}")]
    UnknownTask(String),
    #[error("unknown metric {0:?}, expected \"rtet\" or \"mpct\"")]
    UnknownMetric(String),
    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{task} exited with {status}: {stderr}")]
    TaskFailed {
        task: String,
        status: ExitStatus,
        stderr: String,
    },
}
