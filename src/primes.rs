use crate::partition::{Interval, Strided};

/// Trial division by odd divisors up to the square root of `n`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut k = 3;
    while k * k <= n {
        if n % k == 0 {
            return false;
        }
        k += 2;
    }
    true
}

/// Number of primes in a contiguous block of candidates
pub fn count_in(candidates: Interval) -> u64 {
    candidates.iter().filter(|n| is_prime(*n)).count() as u64
}

/// Number of primes in an interleaved share of candidates
pub fn count_strided(share: Strided) -> u64 {
    share.iter().filter(|n| is_prime(*n)).count() as u64
}
