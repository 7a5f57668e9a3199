// Shared helpers for tests against a live Redis
//
// Every test returns early when REDIS_URL is not set.

use std::time::{SystemTime, UNIX_EPOCH};

use listq_infra_redis::RedisQueues;

pub fn redis_queues() -> Option<RedisQueues> {
    if std::env::var("REDIS_URL").is_err() {
        eprintln!("REDIS_URL not set, skipping live Redis test");
        return None;
    }
    Some(RedisQueues::from_env().expect("REDIS_URL should be a valid connection URL"))
}

/// Name no other test run will collide with
pub fn unique_name(label: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("listq-test:{}:{}:{}", label, std::process::id(), nanos)
}
