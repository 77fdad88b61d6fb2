/// Counts the primes up to PRIME_LIMIT, interleaved across ranks:
/// rank r checks r + 1, r + 1 + size, r + 1 + 2 * size, ...
use mpi::traits::*;
use mpi_bench::constants::PRIME_LIMIT;
use mpi_bench::error::BenchError;
use mpi_bench::{cputime, partition, primes};
use mpi_tasks::gather_sum;
use std::error::Error;
use std::result::Result;
use tracing::debug;

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();
    let universe = mpi::initialize().ok_or(BenchError::AlreadyInitialized)?;
    let world = universe.world();
    let rank = world.rank() as usize;
    let size = world.size() as usize;

    let candidates = partition::strided(rank, size, 1, PRIME_LIMIT)?;
    debug!("rank {}: {} candidates", rank, candidates.len());
    let counter = primes::count_strided(candidates);

    if let Some(total) = gather_sum(&world, counter) {
        println!("{}", total);
    }
    println!("{}", cputime::report()?);
    Ok(())
}
