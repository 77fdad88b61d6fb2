use crate::constants::CPUTIME_PREFIX;
use crate::error::BenchError;
use nix::sys::resource::{getrusage, UsageWho};
use nix::sys::time::TimeVal;
use std::io;

fn timeval_secs(tv: TimeVal) -> f64 {
    tv.tv_sec() as f64 + tv.tv_usec() as f64 * 1e-6
}

/// User plus system cpu seconds consumed by the calling process.
pub fn cputime() -> Result<f64, BenchError> {
    let usage = getrusage(UsageWho::RUSAGE_SELF)
        .map_err(|errno| BenchError::CpuTime(io::Error::from(errno)))?;
    Ok(timeval_secs(usage.user_time()) + timeval_secs(usage.system_time()))
}

/// The `cputime:<seconds>` line a task process prints before exiting.
pub fn report() -> Result<String, BenchError> {
    Ok(format!("{}{:.6}", CPUTIME_PREFIX, cputime()?))
}

pub fn parse_line(line: &str) -> Option<f64> {
    line.trim()
        .strip_prefix(CPUTIME_PREFIX)
        .and_then(|secs| secs.trim().parse().ok())
}
