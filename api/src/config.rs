use std::env;
use std::str::FromStr;

/// Longest look-back window accepted anywhere, in days
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Number of newest candidate posts fetched before mixing
    pub feed_batch_size: u64,
    /// Posts per feed page
    pub feed_page_size: usize,
    /// How far back trending hashtags look, in days
    pub trending_window_days: i64,
    /// Maximum number of trending hashtags returned
    pub trending_limit: usize,
    /// Default window for the viral content report, in days
    pub viral_window_days: i64,
    /// How long a computed viral report is served from memory, in seconds
    pub viral_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            port: 8080,
            feed_batch_size: 100,
            feed_page_size: 10,
            trending_window_days: 3,
            trending_limit: 10,
            viral_window_days: 7,
            viral_cache_ttl_secs: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env_or("PORT", defaults.port),
            feed_batch_size: env_or("FEED_BATCH_SIZE", defaults.feed_batch_size),
            feed_page_size: env_or("FEED_PAGE_SIZE", defaults.feed_page_size),
            trending_window_days: window_days_or(
                "TRENDING_WINDOW_DAYS",
                defaults.trending_window_days,
            ),
            trending_limit: env_or("TRENDING_LIMIT", defaults.trending_limit),
            viral_window_days: window_days_or("VIRAL_WINDOW_DAYS", defaults.viral_window_days),
            viral_cache_ttl_secs: env_or("VIRAL_CACHE_TTL_SECS", defaults.viral_cache_ttl_secs),
        }
    }
}

/// Read and parse an env var, falling back when unset or unparseable
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// A window length in days, clamped to `1..=MAX_WINDOW_DAYS`
fn window_days_or(key: &str, default: i64) -> i64 {
    env_or(key, default).clamp(1, MAX_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        env::set_var("GUPSHUP_TEST_FEED_SIZE", "lots");
        assert_eq!(env_or("GUPSHUP_TEST_FEED_SIZE", 10usize), 10);
        env::set_var("GUPSHUP_TEST_FEED_SIZE", " 25 ");
        assert_eq!(env_or("GUPSHUP_TEST_FEED_SIZE", 10usize), 25);
        env::remove_var("GUPSHUP_TEST_FEED_SIZE");
        assert_eq!(env_or("GUPSHUP_TEST_FEED_SIZE", 10usize), 10);
    }

    #[test]
    fn window_days_are_clamped() {
        env::set_var("GUPSHUP_TEST_WINDOW", "9223372036854775807");
        assert_eq!(window_days_or("GUPSHUP_TEST_WINDOW", 3), MAX_WINDOW_DAYS);
        env::set_var("GUPSHUP_TEST_WINDOW", "-4");
        assert_eq!(window_days_or("GUPSHUP_TEST_WINDOW", 3), 1);
        env::set_var("GUPSHUP_TEST_WINDOW", "14");
        assert_eq!(window_days_or("GUPSHUP_TEST_WINDOW", 3), 14);
        env::remove_var("GUPSHUP_TEST_WINDOW");
        assert_eq!(window_days_or("GUPSHUP_TEST_WINDOW", 3), 3);
    }
}
