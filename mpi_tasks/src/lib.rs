//! Point-to-point plumbing shared by the task programs.
//!
//! The root owns the problem domain: it sends every peer the bounds of its
//! share, computes its own share and then collects one partial result per
//! peer in whatever order they arrive.
use mpi::datatype::Equivalence;
use mpi::topology::Rank;
use mpi::traits::*;
use mpi_bench::constants::{RESULT_TAG, ROOT_RANK, WORK_TAG};
use mpi_bench::error::BenchError;
use mpi_bench::partition::{self, Interval};
use std::ops::AddAssign;
use tracing::debug;

/// Sends interval `p` to rank `p` and returns the root's own interval.
pub fn scatter_intervals<C: Communicator>(
    world: &C,
    intervals: &[Interval],
) -> Result<Interval, BenchError> {
    let size = world.size() as usize;
    if intervals.len() != size {
        return Err(BenchError::PartitionMismatch {
            expected: size,
            actual: intervals.len(),
        });
    }
    for (peer, interval) in intervals.iter().enumerate().skip(1) {
        world
            .process_at_rank(peer as Rank)
            .send_with_tag(&interval.bounds()[..], WORK_TAG);
    }
    Ok(intervals[0])
}

/// Blocks until the root sends this rank its interval.
pub fn receive_interval<C: Communicator>(world: &C) -> Result<Interval, BenchError> {
    let mut bounds = [0u64; 2];
    world
        .process_at_rank(ROOT_RANK)
        .receive_into_with_tag(&mut bounds[..], WORK_TAG);
    Interval::from_bounds(bounds)
}

/// This rank's block of `domain`.
///
/// The root splits the domain and hands out the blocks, every other rank
/// waits for its own.
pub fn share<C: Communicator>(world: &C, domain: Interval) -> Result<Interval, BenchError> {
    let interval = if world.rank() == ROOT_RANK {
        let intervals = partition::blocks(domain, world.size() as usize)?;
        scatter_intervals(world, &intervals)?
    } else {
        receive_interval(world)?
    };
    debug!(
        "rank {}: share [{}, {})",
        world.rank(),
        interval.start,
        interval.end
    );
    Ok(interval)
}

/// Sums every rank's partial result on the root.
///
/// Returns `Some(total)` on the root and `None` everywhere else.
pub fn gather_sum<C, T>(world: &C, local: T) -> Option<T>
where
    C: Communicator,
    T: Equivalence + AddAssign + Copy,
{
    if world.rank() != ROOT_RANK {
        world
            .process_at_rank(ROOT_RANK)
            .send_with_tag(&local, RESULT_TAG);
        return None;
    }

    let mut total = local;
    for _ in 1..world.size() {
        let (partial, status) = world.any_process().receive_with_tag::<T>(RESULT_TAG);
        debug!("root: partial result from rank {}", status.source_rank());
        total += partial;
    }
    Some(total)
}
