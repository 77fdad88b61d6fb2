use mpi_bench::constants::{PRIMES_BELOW_LIMIT, PRIME_LIMIT};
use mpi_bench::partition::{blocks, strided, Interval};
use mpi_bench::primes::{count_in, count_strided};
use std::error::Error;
use std::result::Result;

/// What the root ends up with for `size` ranks in the block variant
fn block_total(limit: u64, size: usize) -> Result<u64, Box<dyn Error>> {
    let domain = Interval::new(1, limit + 1)?;
    Ok(blocks(domain, size)?.into_iter().map(count_in).sum())
}

/// What the root ends up with for `size` ranks in the strided variant
fn strided_total(limit: u64, size: usize) -> Result<u64, Box<dyn Error>> {
    let mut total = 0;
    for rank in 0..size {
        total += count_strided(strided(rank, size, 1, limit)?);
    }
    Ok(total)
}

#[test]
fn test_known_counts() -> Result<(), Box<dyn Error>> {
    assert_eq!(block_total(100_000, 1)?, 9_592);
    assert_eq!(strided_total(1_000_000, 4)?, 78_498);
    Ok(())
}

#[test]
fn test_variants_agree_for_any_process_count() -> Result<(), Box<dyn Error>> {
    for size in 1..=9 {
        assert_eq!(block_total(100_000, size)?, 9_592, "blocks, size {}", size);
        assert_eq!(strided_total(100_000, size)?, 9_592, "strided, size {}", size);
    }
    Ok(())
}

#[test]
#[ignore = "slow without optimizations"]
fn test_primes_below_ten_million() -> Result<(), Box<dyn Error>> {
    assert_eq!(block_total(PRIME_LIMIT, 4)?, PRIMES_BELOW_LIMIT);
    assert_eq!(strided_total(PRIME_LIMIT, 3)?, PRIMES_BELOW_LIMIT);
    Ok(())
}
