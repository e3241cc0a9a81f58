//! Proper orthogonal decomposition of a snapshot matrix.
//!
//! The singular spectrum of the snapshot history is computed once, and the
//! POD rank is the smallest number of leading singular values whose share
//! of the total meets an energy tolerance. The matching left singular
//! vectors form the reduced basis.

pub mod basis;
pub mod error;
pub mod rank;
pub mod reducer;
pub mod spectrum;

pub use basis::PodBasis;
pub use error::{ReduceError, ReduceResult};
pub use rank::{RankSelection, select_rank};
pub use reducer::{PodReducer, PodReduction, ReduceOptions, reduce};
pub use spectrum::Spectrum;
