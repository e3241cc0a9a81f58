//! Rank selection by cumulative energy.

use crate::error::{ReduceError, ReduceResult};

/// Chosen POD rank and the energy it leaves out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankSelection {
    pub rank: usize,
    /// `1 - sum(values[..rank]) / sum(values)`
    pub residual_energy: f64,
}

/// Smallest `r` with `1 - sum(values[..r]) / sum(values) <= tolerance`.
///
/// `values` must be the descending singular spectrum. The search is capped
/// at `max_rank` (or the spectrum length). Prefix sums share the summation
/// order of the total, so the residual at full rank is exactly zero and an
/// uncapped search always succeeds; with a cap the criterion may stay
/// unmet, which is reported as [`ReduceError::ToleranceUnreachable`].
pub fn select_rank(
    values: &[f64],
    tolerance: f64,
    max_rank: Option<usize>,
) -> ReduceResult<RankSelection> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ReduceError::InvalidArg {
            what: "energy tolerance must be finite and non-negative",
        });
    }
    if values.is_empty() {
        return Err(ReduceError::InvalidArg {
            what: "singular spectrum is empty",
        });
    }
    if max_rank == Some(0) {
        return Err(ReduceError::InvalidArg {
            what: "max_rank must be at least 1",
        });
    }

    let prefix: Vec<f64> = values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect();
    let total = prefix[prefix.len() - 1];

    if !total.is_finite() {
        return Err(ReduceError::NonFinite {
            what: "singular spectrum",
        });
    }
    if total == 0.0 {
        return Err(ReduceError::DegenerateSpectrum);
    }

    let limit = max_rank.map_or(values.len(), |m| m.min(values.len()));
    let residual = |r: usize| 1.0 - prefix[r - 1] / total;

    let mut rank = 1;
    while residual(rank) > tolerance && rank < limit {
        rank += 1;
    }

    let residual_energy = residual(rank);
    if residual_energy > tolerance {
        return Err(ReduceError::ToleranceUnreachable {
            max_rank: limit,
            residual_energy,
            tolerance,
        });
    }

    Ok(RankSelection {
        rank,
        residual_energy,
    })
}
