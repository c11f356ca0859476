//! State for the profile and status lookups.

use chrono::{DateTime, Utc};

/// Which lookup a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Player,
    Faction,
    Status,
}

/// One lookup pane: the last query and what came back.
#[derive(Debug, Default)]
pub struct LookupState {
    /// Last submitted query. Unused for status.
    pub query: String,
    /// Rendered response or error text.
    pub output: String,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Vertical scroll offset into `output`.
    pub scroll: u16,
    /// When `output` was last set.
    pub last_updated: Option<DateTime<Utc>>,
}

impl LookupState {
    /// Mark a request as started.
    pub fn start(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.output = "Loading…".to_string();
        self.loading = true;
        self.scroll = 0;
    }

    /// Store a finished request's text.
    pub fn finish(&mut self, output: String) {
        self.output = output;
        self.loading = false;
        self.scroll = 0;
        self.last_updated = Some(Utc::now());
    }

    /// Scroll by `delta` lines, staying within the output.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.output.lines().count().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max.max(0)) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut state = LookupState::default();
        state.start("Notch");
        assert!(state.loading);
        assert_eq!(state.output, "Loading…");

        state.finish("{\n  \"name\": \"Notch\"\n}".to_string());
        assert!(!state.loading);
        assert_eq!(state.query, "Notch");

        state.scroll_by(10);
        assert_eq!(state.scroll, 2);
        state.scroll_by(-10);
        assert_eq!(state.scroll, 0);
    }
}
