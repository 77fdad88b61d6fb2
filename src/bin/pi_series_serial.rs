/// Arctan series pi over every term in a single process.
/// Baseline for the parallel series task, no message passing runtime involved.
use mpi_bench::constants::LEIBNIZ_TERMS;
use mpi_bench::partition::Interval;
use mpi_bench::{cputime, pi};
use std::error::Error;
use std::result::Result;
use tracing::debug;

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();

    // terms are 1-based
    let terms = Interval::new(1, LEIBNIZ_TERMS + 1)?;
    debug!("summing {} terms", terms.len());
    let estimate = pi::leibniz_sum(terms);

    println!("{:.6}", estimate);
    println!("{}", cputime::report()?);
    Ok(())
}
