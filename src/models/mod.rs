mod book;
mod reading;
mod recommendation;
mod user;

pub use book::Book;
pub use reading::{HistoryEntry, ReadingEntry, ReadingStatus};
pub use recommendation::{
    ComfortComparison, ComfortLevel, ComfortWeights, Recommendation, RecommendationFilters,
    RecommendationRequest, ScoreBreakdown, SimilarityScores,
};
pub use user::{User, UserPreferences};
