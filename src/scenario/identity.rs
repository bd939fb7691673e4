use std::time::{SystemTime, UNIX_EPOCH};

/// Test identifiers derived from one Unix timestamp, so repeated runs
/// against a shared environment never collide on email or course name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub timestamp: u64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub course_name: String,
    pub course_description: String,
    pub module_name: String,
    pub module_description: String,
}

impl RunIdentity {
    /// Identity for a new run, stamped with the current Unix time.
    pub fn generate(prefix: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_timestamp(prefix, timestamp)
    }

    /// Deterministic variant for tests.
    pub fn from_timestamp(prefix: &str, timestamp: u64) -> Self {
        RunIdentity {
            timestamp,
            email: format!("{}_{}@example.com", prefix, timestamp),
            username: format!("{}_{}", prefix, timestamp),
            password: "Password123!".to_string(),
            course_name: format!("Test Course {}", timestamp),
            course_description: format!("Test course description {}", timestamp),
            module_name: format!("module_{}", timestamp),
            module_description: format!("module description {}", timestamp),
        }
    }
}
