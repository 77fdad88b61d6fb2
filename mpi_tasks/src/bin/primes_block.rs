/// Counts the primes up to PRIME_LIMIT, each rank checking one contiguous
/// block of candidates handed out by the root.
use mpi_bench::constants::PRIME_LIMIT;
use mpi_bench::error::BenchError;
use mpi_bench::partition::Interval;
use mpi_bench::{cputime, primes};
use mpi_tasks::{gather_sum, share};
use std::error::Error;
use std::result::Result;

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();
    let universe = mpi::initialize().ok_or(BenchError::AlreadyInitialized)?;
    let world = universe.world();

    let candidates = share(&world, Interval::new(1, PRIME_LIMIT + 1)?)?;
    let counter = primes::count_in(candidates);

    if let Some(total) = gather_sum(&world, counter) {
        println!("{}", total);
    }
    println!("{}", cputime::report()?);
    Ok(())
}
