// Sub-modules
mod core;
mod loader;
mod recommendations;
mod scoring;
mod thresholds;

pub use self::core::DeviqConfig;
pub use self::loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, user_config_path, CONFIG_FILE_NAME,
};
pub use self::recommendations::RecommendationConfig;
pub use self::scoring::{ScoringConfig, MAX_SCORE, MIN_SCORE, STANDARD_SECTIONS};
pub use self::thresholds::{MaturityThresholds, ThresholdsConfig, DEFAULT_COMPLETION_THRESHOLD};

/// Normalize a display name into a lookup key: lowercase, spaces to underscores.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
