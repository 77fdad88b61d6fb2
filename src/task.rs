use crate::constants::PRIMES_BELOW_LIMIT;
use crate::error::BenchError;
use serde::Serialize;

/// How the driver starts a task binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Launch {
    /// under `mpirun -n <np>`
    Mpi,
    /// directly, as a single process
    Serial,
}

/// What a correct run prints on its result line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Expected {
    Count(u64),
    Approx { value: f64, tolerance: f64 },
}

impl Expected {
    pub fn matches(&self, line: &str) -> bool {
        let line = line.trim();
        match *self {
            Expected::Count(count) => line.parse::<u64>().map_or(false, |c| c == count),
            Expected::Approx { value, tolerance } => line
                .parse::<f64>()
                .map_or(false, |v| (v - value).abs() <= tolerance),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Task {
    pub alias: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// executable name inside the driver's bin directory
    pub binary: &'static str,
    pub launch: Launch,
    pub expected: Expected,
}

const PI: Expected = Expected::Approx {
    value: std::f64::consts::PI,
    tolerance: 1.0e-3,
};

pub static TASKS: [Task; 5] = [
    Task {
        alias: "pi",
        name: "Pi Approximation",
        description: "Approximates pi using arctan integral formula (dx = 2e-9)",
        binary: "pi",
        launch: Launch::Mpi,
        expected: PI,
    },
    Task {
        alias: "primes",
        name: "Count Primes",
        description: "Counts the number of prime integers between 1 and 10e6, interleaved by rank",
        binary: "primes",
        launch: Launch::Mpi,
        expected: Expected::Count(PRIMES_BELOW_LIMIT),
    },
    Task {
        alias: "primes-block",
        name: "Count Primes (blocks)",
        description: "Counts the number of prime integers between 1 and 10e6, in contiguous blocks",
        binary: "primes_block",
        launch: Launch::Mpi,
        expected: Expected::Count(PRIMES_BELOW_LIMIT),
    },
    Task {
        alias: "pi-series",
        name: "Pi Series",
        description: "Approximates pi using the arctan series over 5e9 terms",
        binary: "pi_series",
        launch: Launch::Mpi,
        expected: PI,
    },
    Task {
        alias: "pi-series-serial",
        name: "Pi Series (serial)",
        description: "Single process baseline of the arctan series over 5e9 terms",
        binary: "pi_series_serial",
        launch: Launch::Serial,
        expected: PI,
    },
];

pub fn find(alias: &str) -> Result<&'static Task, BenchError> {
    let alias = alias.to_lowercase();
    TASKS
        .iter()
        .find(|task| task.alias == alias)
        .ok_or(BenchError::UnknownTask(alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("PI").unwrap().binary, "pi");
        assert_eq!(find("primes-block").unwrap().launch, Launch::Mpi);
        let serial = find("pi-series-serial").unwrap();
        assert_eq!(serial.binary, "pi_series_serial");
        assert_eq!(serial.launch, Launch::Serial);
        assert!(matches!(find("fib"), Err(BenchError::UnknownTask(_))));
    }

    #[test]
    fn test_expected() {
        assert!(Expected::Count(664_579).matches("664579\n"));
        assert!(!Expected::Count(664_579).matches("664580"));
        assert!(PI.matches("3.142"));
        assert!(!PI.matches("3.100"));
        assert!(!PI.matches("cputime:1.0"));
    }

    #[test]
    fn test_aliases_unique() {
        for (i, a) in TASKS.iter().enumerate() {
            for b in &TASKS[i + 1..] {
                assert_ne!(a.alias, b.alias);
            }
        }
    }
}
