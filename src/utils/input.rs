//! Clear-on-significant-delete policy for the live search input.
//!
//! When the user deletes a large part of the search text (or all of it), a
//! reset is armed and fires once the input has been quiet for a while. This
//! sits in front of the table; the table itself only sees the resulting
//! search submissions.

use std::time::{Duration, Instant};

/// Debounced reset triggered by large deletions.
#[derive(Debug, Clone)]
pub struct ClearOnDelete {
    min_deleted: usize,
    quiet_period: Duration,
    last_value: String,
    deadline: Option<Instant>,
}

impl ClearOnDelete {
    pub fn new(min_deleted: usize, quiet_period: Duration) -> Self {
        Self {
            min_deleted: min_deleted.max(1),
            quiet_period,
            last_value: String::new(),
            deadline: None,
        }
    }

    /// Record a new input value observed at `now`.
    pub fn on_input(&mut self, value: &str, now: Instant) {
        let previous = self.last_value.chars().count();
        let current = value.chars().count();
        let deleted = previous.saturating_sub(current);

        let emptied = current == 0 && previous > 0;
        self.deadline = if emptied || deleted >= self.min_deleted {
            Some(now + self.quiet_period)
        } else {
            None
        };
        self.last_value = value.to_string();
    }

    /// Returns true once when an armed reset is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn current(&self) -> &str {
        &self.last_value
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl Default for ClearOnDelete {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(400))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_does_not_arm() {
        let start = Instant::now();
        let mut policy = ClearOnDelete::default();
        policy.on_input("ac", start);
        policy.on_input("acme", start);
        assert!(!policy.is_armed());
        assert!(!policy.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_emptying_fires_after_quiet_period() {
        let start = Instant::now();
        let mut policy = ClearOnDelete::new(3, Duration::from_millis(400));
        policy.on_input("ab", start);
        policy.on_input("", start);
        assert!(policy.is_armed());
        assert!(!policy.poll(start + Duration::from_millis(100)));
        assert!(policy.poll(start + Duration::from_millis(400)));
        assert!(!policy.poll(start + Duration::from_millis(800)));
    }

    #[test]
    fn test_large_delete_arms_and_new_typing_disarms() {
        let start = Instant::now();
        let mut policy = ClearOnDelete::new(3, Duration::from_millis(400));
        policy.on_input("payroll", start);
        policy.on_input("pay", start);
        assert!(policy.is_armed());
        policy.on_input("pays", start + Duration::from_millis(50));
        assert!(!policy.is_armed());
    }
}
