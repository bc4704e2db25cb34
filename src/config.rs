use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default number of recommendations per request
    #[serde(default = "default_recommendation_count")]
    pub default_recommendation_count: usize,

    /// Upper bound on the per-request recommendation count
    #[serde(default = "max_recommendation_count")]
    pub max_recommendation_count: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_count() -> usize {
    10
}

fn max_recommendation_count() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_recommendation_count: default_recommendation_count(),
            max_recommendation_count: max_recommendation_count(),
        }
    }
}

/// Fixed scoring constants passed explicitly into the recommender
///
/// Constructed once at startup so the scoring functions stay pure and take
/// every knob as an argument instead of reading ambient globals.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Lowest rating a reader can give
    pub rating_min: f64,
    /// Highest rating a reader can give
    pub rating_max: f64,
    /// Additive affinity boost for explicitly stated favorite genres/authors
    pub preference_boost: f64,
    /// Number of recommendations returned when the request does not say
    pub default_count: usize,
    /// Hard cap on the per-request recommendation count
    pub max_count: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rating_min: 1.0,
            rating_max: 5.0,
            preference_boost: 0.25,
            default_count: default_recommendation_count(),
            max_count: max_recommendation_count(),
        }
    }
}

impl ScoringConfig {
    /// Derives scoring constants from the application config
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_count: config.default_recommendation_count,
            max_count: config.max_recommendation_count,
            ..Self::default()
        }
    }

    /// Full span of the rating scale
    pub fn rating_span(&self) -> f64 {
        self.rating_max - self.rating_min
    }

    /// Normalizes a rating to [0, 1]
    pub fn normalize_rating(&self, rating: f64) -> f64 {
        ((rating - self.rating_min) / self.rating_span()).clamp(0.0, 1.0)
    }

    /// Whether a rating lies on the configured scale
    pub fn rating_in_scale(&self, rating: f64) -> bool {
        rating >= self.rating_min && rating <= self.rating_max
    }
}
