/// Approximates pi by integrating 4 / (1 + x^2) over [0, 1) with the
/// midpoint rule, each rank integrating one contiguous block of steps.
use mpi_bench::constants::PI_STEP;
use mpi_bench::error::BenchError;
use mpi_bench::{cputime, pi};
use mpi_tasks::{gather_sum, share};
use std::error::Error;
use std::result::Result;

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();
    let universe = mpi::initialize().ok_or(BenchError::AlreadyInitialized)?;
    let world = universe.world();

    let steps = share(&world, pi::domain(PI_STEP))?;
    let local_pi = pi::midpoint_sum(steps, PI_STEP);

    if let Some(estimate) = gather_sum(&world, local_pi) {
        println!("{:.3}", estimate);
    }
    println!("{}", cputime::report()?);
    Ok(())
}
