//! Pi approximations that can be summed piecewise across processes.
use crate::partition::Interval;

/// The arctan derivative scaled so that its integral over [0, 1) is pi.
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Number of integration steps of width `dx` on [0, 1)
pub fn step_count(dx: f64) -> u64 {
    (1.0 / dx).round() as u64
}

/// Every integration step on [0, 1)
pub fn domain(dx: f64) -> Interval {
    Interval {
        start: 0,
        end: step_count(dx),
    }
}

/// Midpoint rule over the given steps, scaled by the step width.
///
/// Step `i` covers `[i * dx, (i + 1) * dx)`, so the partial sums of any
/// partition of `domain(dx)` add up to the full integral.
pub fn midpoint_sum(steps: Interval, dx: f64) -> f64 {
    let mut sum = 0.0;
    for i in steps.iter() {
        let x = (i as f64 + 0.5) * dx;
        sum += integrand(x);
    }
    sum * dx
}

/// Partial sum of the arctan series `4 * (1 - 1/3 + 1/5 - ...)` over the
/// 1-based terms in `terms`.
pub fn leibniz_sum(terms: Interval) -> f64 {
    let mut sum = 0.0;
    for i in terms.iter() {
        let denom = (2 * i - 1) as f64;
        if i % 2 == 1 {
            sum += 1.0 / denom;
        } else {
            sum -= 1.0 / denom;
        }
    }
    sum * 4.0
}
