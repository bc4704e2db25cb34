//! The comfort-level recommendation core
//!
//! Pure, synchronous, allocation-local: build a taste profile from history,
//! score candidates against it, weight the sub-scores by comfort level, and
//! rank. No I/O and no shared mutable state anywhere in this module.

pub mod comfort;
pub mod profile;
pub mod ranker;
pub mod similarity;

pub use comfort::{apply_comfort, novel_fraction};
pub use profile::{build_profile, PreferredRange, TasteProfile};
pub use ranker::{compare_all_levels, recommend, similar_to};
pub use similarity::{score_similarity, NEUTRAL_SCORE};
