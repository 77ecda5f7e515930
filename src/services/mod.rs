pub mod coverage_tracker;
pub mod question_factory;
pub mod shuffler;

pub use coverage_tracker::{CoverageReport, CoverageTracker, TagCoverage, DEFAULT_COVERAGE_TARGET};
pub use question_factory::{DistractorPolicy, QuestionFactory, REQUIRED_DISTRACTORS};
pub use shuffler::{FixedPermutation, OptionShuffler, RandomShuffler};
