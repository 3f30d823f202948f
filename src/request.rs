//! Request state
//!
//! Tracks one backend request at a time and the last value it produced. A
//! failed request never throws away data that is already on screen.

use chrono::{DateTime, Utc};
use tracing::warn;

/// Outcome of the most recent request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The last request succeeded
    Ready,
    /// The last request failed with this message
    Failed(String),
}

/// A value fetched from the backend together with its request state
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    value: Option<T>,
    state: RequestState,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            state: RequestState::Idle,
            loaded_at: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// When the current value arrived
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn is_pending(&self) -> bool {
        self.state == RequestState::Pending
    }

    /// Message of the last failure, if the last request failed
    pub fn error(&self) -> Option<&str> {
        match self.state {
            RequestState::Failed(ref message) => Some(message),
            _ => None,
        }
    }

    /// Mark a request as started
    pub fn begin(&mut self) {
        self.state = RequestState::Pending;
    }

    /// Settle the request. Errors keep the previous value.
    pub fn finish(&mut self, result: anyhow::Result<T>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.loaded_at = Some(Utc::now());
                self.state = RequestState::Ready;
            }
            Err(e) => {
                let message = format!("{:#}", e);
                warn!("Request failed: {}", message);
                self.state = RequestState::Failed(message);
            }
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_lifecycle() {
        let mut loadable: Loadable<Vec<u32>> = Loadable::new();
        assert_eq!(loadable.state(), &RequestState::Idle);
        assert!(loadable.value().is_none());

        loadable.begin();
        assert!(loadable.is_pending());

        loadable.finish(Ok(vec![1, 2]));
        assert_eq!(loadable.state(), &RequestState::Ready);
        assert_eq!(loadable.value(), Some(&vec![1, 2]));
        assert!(loadable.loaded_at().is_some());
    }

    #[test]
    fn test_failure_keeps_stale_value() {
        let mut loadable = Loadable::new();
        loadable.finish(Ok("v1"));
        let first_load = loadable.loaded_at();

        loadable.begin();
        loadable.finish(Err(anyhow!("timed out")));

        assert_eq!(loadable.error(), Some("timed out"));
        assert_eq!(loadable.value(), Some(&"v1"));
        assert_eq!(loadable.loaded_at(), first_load);
    }

    #[test]
    fn test_error_message_includes_context() {
        let mut loadable: Loadable<()> = Loadable::new();
        let result: anyhow::Result<()> = Err(anyhow!("disk full")).context("Failed to save");
        loadable.finish(result);
        assert_eq!(loadable.error(), Some("Failed to save: disk full"));
    }
}
