use std::env;
use std::time::Duration;

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_SEED_POSTS: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of posts requested per page
    pub page_size: usize,
    /// Number of generated posts the in-memory repository starts with
    pub seed_posts: usize,
    /// Simulated round-trip time for every repository call
    pub latency: Duration,
    /// Display name of the user driving the console
    pub user_name: String,
    pub username: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            page_size: parse_var("FEED_PAGE_SIZE")
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .max(1),
            seed_posts: parse_var("FEED_SEED_POSTS").unwrap_or(DEFAULT_SEED_POSTS),
            latency: Duration::from_millis(parse_var("FEED_LATENCY_MS").unwrap_or(0)),
            user_name: env::var("FEED_USER_NAME").unwrap_or_else(|_| "Current User".to_string()),
            username: env::var("FEED_USERNAME").unwrap_or_else(|_| "currentuser".to_string()),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_ignores_garbage() {
        env::set_var("FEEDLINE_TEST_GARBAGE", "ten");
        assert_eq!(parse_var::<usize>("FEEDLINE_TEST_GARBAGE"), None);

        env::set_var("FEEDLINE_TEST_NUMBER", " 25 ");
        assert_eq!(parse_var::<usize>("FEEDLINE_TEST_NUMBER"), Some(25));
    }

    #[test]
    fn parse_var_missing() {
        assert_eq!(parse_var::<u64>("FEEDLINE_TEST_DEFINITELY_UNSET"), None);
    }
}
