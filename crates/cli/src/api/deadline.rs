//! One time budget shared by every request of a command

use simpleflags_compiler::{RemoteError, RemoteResult};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Time left, or `None` once the budget is spent
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .checked_duration_since(Instant::now())
            .filter(|left| !left.is_zero())
    }

    /// Time left for `operation`; a spent budget fails without sending.
    pub fn check(&self, operation: &str) -> RemoteResult<Duration> {
        match self.remaining() {
            Some(left) => {
                tracing::trace!(operation, remaining_ms = left.as_millis() as u64, "deadline check");
                Ok(left)
            }
            None => Err(RemoteError::Timeout(format!(
                "{operation}: command deadline of {}s exceeded",
                self.budget.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_deadline_has_time_left() {
        let deadline = Deadline::after(Duration::from_secs(30));
        let left = deadline.check("get_flag").unwrap();
        assert!(left <= Duration::from_secs(30));
        assert!(left > Duration::from_secs(29));
    }

    #[test]
    fn test_spent_deadline_times_out() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.remaining().is_none());
        match deadline.check("create_flag") {
            Err(RemoteError::Timeout(msg)) => assert!(msg.contains("create_flag")),
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }
}
