use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    config::ScoringConfig,
    error::{AppError, AppResult},
};

use super::Book;

/// Reader-selected dial trading familiarity against novelty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComfortLevel {
    /// Very similar to previous reads
    SameOld,
    /// Close to previous reads with gentle variety
    ComfortZone,
    /// Mix of familiar and new
    Balanced,
    /// Mostly new territory
    Adventurous,
    /// As far from previous reads as the catalog allows
    CompletelyNew,
}

/// Weight vector applied to the four similarity sub-scores, plus the signed
/// novelty coefficient
///
/// The four similarity weights of every level sum to exactly 1.0. The novelty
/// coefficient is the adjustment a fully-novel book receives; a fully-familiar
/// book receives its mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortWeights {
    pub genre: f64,
    pub author: f64,
    pub rating: f64,
    pub page_count: f64,
    pub novelty: f64,
}

impl ComfortWeights {
    /// Sum of the four similarity weights
    pub fn similarity_sum(&self) -> f64 {
        self.genre + self.author + self.rating + self.page_count
    }
}

impl ComfortLevel {
    /// All levels, ordered from most familiar to most novel
    pub const ALL: [ComfortLevel; 5] = [
        ComfortLevel::SameOld,
        ComfortLevel::ComfortZone,
        ComfortLevel::Balanced,
        ComfortLevel::Adventurous,
        ComfortLevel::CompletelyNew,
    ];

    /// The fixed weight vector for this level
    pub fn weights(&self) -> ComfortWeights {
        match self {
            ComfortLevel::SameOld => ComfortWeights {
                genre: 0.40,
                author: 0.30,
                rating: 0.20,
                page_count: 0.10,
                novelty: -0.30,
            },
            ComfortLevel::ComfortZone => ComfortWeights {
                genre: 0.35,
                author: 0.25,
                rating: 0.25,
                page_count: 0.15,
                novelty: -0.15,
            },
            ComfortLevel::Balanced => ComfortWeights {
                genre: 0.30,
                author: 0.20,
                rating: 0.30,
                page_count: 0.20,
                novelty: 0.0,
            },
            ComfortLevel::Adventurous => ComfortWeights {
                genre: 0.20,
                author: 0.15,
                rating: 0.40,
                page_count: 0.25,
                novelty: 0.15,
            },
            ComfortLevel::CompletelyNew => ComfortWeights {
                genre: 0.10,
                author: 0.10,
                rating: 0.50,
                page_count: 0.30,
                novelty: 0.30,
            },
        }
    }

    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortLevel::SameOld => "same_old",
            ComfortLevel::ComfortZone => "comfort_zone",
            ComfortLevel::Balanced => "balanced",
            ComfortLevel::Adventurous => "adventurous",
            ComfortLevel::CompletelyNew => "completely_new",
        }
    }
}

impl Default for ComfortLevel {
    fn default() -> Self {
        ComfortLevel::Balanced
    }
}

impl Display for ComfortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComfortLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComfortLevel::ALL
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::InvalidComfortLevel(s.to_string()))
    }
}

/// Hard filters applied to the candidate pool before scoring
///
/// Filters exclude, they never adjust a score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationFilters {
    /// Keep only books carrying this genre
    pub genre: Option<String>,
    /// Keep only books by this author
    pub author: Option<String>,
    /// Keep only books rated at least this highly
    pub min_rating: Option<f64>,
    /// Keep only books at least this long
    pub min_page_count: Option<u32>,
    /// Keep only books at most this long
    pub max_page_count: Option<u32>,
}

impl RecommendationFilters {
    /// Whether a book survives every set filter
    ///
    /// A book missing the attribute a filter constrains is excluded: a filter
    /// cannot vouch for data that is not there.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(genre) = &self.genre {
            if !book.has_genre(genre) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if !book.has_author(author) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            match book.average_rating {
                Some(rating) if rating >= min_rating => {}
                _ => return false,
            }
        }
        if let Some(min_pages) = self.min_page_count {
            match book.page_count {
                Some(pages) if pages >= min_pages => {}
                _ => return false,
            }
        }
        if let Some(max_pages) = self.max_page_count {
            match book.page_count {
                Some(pages) if pages <= max_pages => {}
                _ => return false,
            }
        }
        true
    }
}

/// A request for a ranked recommendation list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequest {
    /// Selected comfort level
    #[serde(default)]
    pub comfort_level: ComfortLevel,
    /// Hard filters on the candidate pool
    #[serde(flatten)]
    pub filters: RecommendationFilters,
    /// How many recommendations to return
    pub count: Option<usize>,
    /// Drop books the reader is reading or has completed
    #[serde(default = "default_exclude_read")]
    pub exclude_read: bool,
}

fn default_exclude_read() -> bool {
    true
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            comfort_level: ComfortLevel::default(),
            filters: RecommendationFilters::default(),
            count: None,
            exclude_read: true,
        }
    }
}

impl RecommendationRequest {
    /// Rejects internally inconsistent requests before any scoring begins
    pub fn validate(&self, config: &ScoringConfig) -> AppResult<()> {
        if let Some(min_rating) = self.filters.min_rating {
            if !config.rating_in_scale(min_rating) {
                return Err(AppError::InvalidFilter(format!(
                    "min_rating {} is outside the {}..{} scale",
                    min_rating, config.rating_min, config.rating_max
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.filters.min_page_count, self.filters.max_page_count) {
            if max < min {
                return Err(AppError::InvalidFilter(format!(
                    "max_page_count {} is below min_page_count {}",
                    max, min
                )));
            }
        }
        if let Some(count) = self.count {
            if count == 0 || count > config.max_count {
                return Err(AppError::InvalidFilter(format!(
                    "count must be between 1 and {}",
                    config.max_count
                )));
            }
        }
        Ok(())
    }

    /// Result count after applying the configured default
    pub fn effective_count(&self, config: &ScoringConfig) -> usize {
        self.count.unwrap_or(config.default_count)
    }
}

/// Per-candidate similarity sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    pub genre: f64,
    pub author: f64,
    pub rating: f64,
    pub page_count: f64,
}

/// Full scoring explanation for one (book, comfort level) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Best-genre-match sub-score
    pub genre: f64,
    /// Best-author-match sub-score
    pub author: f64,
    /// Rating-pattern sub-score
    pub rating: f64,
    /// Page-count sub-score
    pub page_count: f64,
    /// Signed novelty adjustment
    pub novelty: f64,
    /// Weighted composite; a relative ranking signal, not a probability
    pub composite: f64,
}

/// One ranked recommendation with its explanation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub book: Book,
    pub breakdown: ScoreBreakdown,
    /// Human-readable reasons the book was picked
    pub reasons: Vec<String>,
}

impl Recommendation {
    /// Composite ranking score
    pub fn score(&self) -> f64 {
        self.breakdown.composite
    }
}

/// One comfort level's ranked list, for side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComfortComparison {
    pub comfort_level: ComfortLevel,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comfort_level_serialization() {
        let json = serde_json::to_string(&ComfortLevel::SameOld).unwrap();
        assert_eq!(json, "\"same_old\"");
        let json = serde_json::to_string(&ComfortLevel::CompletelyNew).unwrap();
        assert_eq!(json, "\"completely_new\"");
    }

    #[test]
    fn test_comfort_level_from_str() {
        assert_eq!(
            "adventurous".parse::<ComfortLevel>().unwrap(),
            ComfortLevel::Adventurous
        );
        let err = "wild_card".parse::<ComfortLevel>().unwrap_err();
        assert!(matches!(err, AppError::InvalidComfortLevel(_)));
    }

    #[test]
    fn test_similarity_weights_sum_to_one_for_every_level() {
        for level in ComfortLevel::ALL {
            let sum = level.weights().similarity_sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "weights for {} sum to {}",
                level,
                sum
            );
        }
    }

    #[test]
    fn test_novelty_coefficients_increase_across_levels() {
        let coefficients: Vec<f64> = ComfortLevel::ALL
            .iter()
            .map(|level| level.weights().novelty)
            .collect();
        for pair in coefficients.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(ComfortLevel::SameOld.weights().novelty < 0.0);
        assert_eq!(ComfortLevel::Balanced.weights().novelty, 0.0);
        assert!(ComfortLevel::CompletelyNew.weights().novelty > 0.0);
    }

    #[test]
    fn test_filter_rejects_inverted_page_bounds() {
        let request = RecommendationRequest {
            filters: RecommendationFilters {
                min_page_count: Some(400),
                max_page_count: Some(100),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = request.validate(&ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::InvalidFilter(_)));
    }

    #[test]
    fn test_filter_rejects_off_scale_min_rating() {
        let request = RecommendationRequest {
            filters: RecommendationFilters {
                min_rating: Some(7.5),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(request.validate(&ScoringConfig::default()).is_err());
    }

    #[test]
    fn test_filter_rejects_zero_and_oversized_count() {
        let config = ScoringConfig::default();
        let mut request = RecommendationRequest {
            count: Some(0),
            ..Default::default()
        };
        assert!(request.validate(&config).is_err());
        request.count = Some(config.max_count + 1);
        assert!(request.validate(&config).is_err());
        request.count = Some(config.max_count);
        assert!(request.validate(&config).is_ok());
    }

    #[test]
    fn test_filter_matching_requires_attribute_presence() {
        let mut book = Book::new("Untracked", vec!["mystery".to_string()], vec![]);
        book.average_rating = None;
        let filters = RecommendationFilters {
            min_rating: Some(3.0),
            ..Default::default()
        };
        assert!(!filters.matches(&book));

        book.average_rating = Some(4.2);
        assert!(filters.matches(&book));
    }

    #[test]
    fn test_effective_count_falls_back_to_default() {
        let config = ScoringConfig::default();
        let request = RecommendationRequest::default();
        assert_eq!(request.effective_count(&config), config.default_count);
        let request = RecommendationRequest {
            count: Some(3),
            ..Default::default()
        };
        assert_eq!(request.effective_count(&config), 3);
    }
}
