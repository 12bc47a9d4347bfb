use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Destructive,
}

/// Transient user-facing message. Fire and forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new("Error", description, Severity::Destructive)
    }

    pub fn submitted() -> Self {
        Self::new(
            "Success!",
            "Your details have been submitted successfully.",
            Severity::Default,
        )
    }

    pub fn submit_failed() -> Self {
        Self::error("Failed to submit your details. Please try again.")
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Holds at most one visible notification; a newer one replaces the older.
#[derive(Debug)]
pub struct NotificationSlot {
    current: Option<(Notification, Instant)>,
    ttl: Duration,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, notification: Notification, now: Instant) {
        self.current = Some((notification, now));
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    /// Drop the notification once its time to live has passed. Returns true
    /// when something was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, shown_at)) if now.saturating_duration_since(*shown_at) >= self.ttl => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
