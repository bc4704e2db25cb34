pub mod recommendations;

pub use recommendations::{
    compare_comfort_levels, recommend_for_user, similar_books, RankedRecommendations,
};
