/// Approximates pi with the arctan series 4 * (1 - 1/3 + 1/5 - ...),
/// each rank summing one contiguous block of terms.
use mpi_bench::constants::LEIBNIZ_TERMS;
use mpi_bench::error::BenchError;
use mpi_bench::partition::Interval;
use mpi_bench::{cputime, pi};
use mpi_tasks::{gather_sum, share};
use std::error::Error;
use std::result::Result;

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();
    let universe = mpi::initialize().ok_or(BenchError::AlreadyInitialized)?;
    let world = universe.world();

    // terms are 1-based
    let terms = share(&world, Interval::new(1, LEIBNIZ_TERMS + 1)?)?;
    let local_pi = pi::leibniz_sum(terms);

    if let Some(estimate) = gather_sum(&world, local_pi) {
        println!("{:.6}", estimate);
    }
    println!("{}", cputime::report()?);
    Ok(())
}
