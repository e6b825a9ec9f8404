//! Command implementations

pub mod batch;
pub mod benchmark;
pub mod index;
pub mod solve;

pub use batch::{BatchConfig, BatchReport, run_batch, write_unsolved};
pub use benchmark::{DEFAULT_SEED, run_benchmark, sample_targets};
pub use index::{IndexStats, build_index, prepare_index, report_cache_outcome, run_build_index};
pub use solve::{TargetChoice, solve_word};
