/// rank of the coordinating process
pub const ROOT_RANK: i32 = 0;
/// tag of messages carrying a work interval to a peer
pub const WORK_TAG: i32 = 0;
/// tag of messages carrying a partial result back to the root
pub const RESULT_TAG: i32 = 1;
/// integration step size for the midpoint pi task
pub const PI_STEP: f64 = 0.000_000_002;
/// number of arctan series terms for the series pi task
pub const LEIBNIZ_TERMS: u64 = 5_000_000_000;
/// largest candidate checked by the prime counting tasks
pub const PRIME_LIMIT: u64 = 10_000_000;
/// number of primes up to and including `PRIME_LIMIT`
pub const PRIMES_BELOW_LIMIT: u64 = 664_579;
/// prefix of the cpu time line every task process prints
pub const CPUTIME_PREFIX: &str = "cputime:";
