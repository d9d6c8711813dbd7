use chrono::{DateTime, Duration, Utc};

/// Decides whether a refresh trigger should actually refetch.
///
/// The caller owns the timer; this only remembers when data was last
/// fetched successfully and compares its age against a threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPolicy {
    threshold: Duration,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl RefreshPolicy {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_refreshed_at: None,
        }
    }

    pub fn every_minutes(minutes: u32) -> Self {
        Self::new(Duration::minutes(i64::from(minutes)))
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    /// Due when nothing has been fetched yet or the data is at least
    /// `threshold` old.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_refreshed_at {
            None => true,
            Some(last) => now - last >= self.threshold,
        }
    }

    /// Record a successful refresh. Failed cycles must not call this.
    pub fn mark_refreshed(&mut self, at: DateTime<Utc>) {
        self.last_refreshed_at = Some(at);
    }
}
