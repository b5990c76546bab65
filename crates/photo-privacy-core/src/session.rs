//! Per-upload result holder where the most recently started request wins.
//!
//! Each analysis takes a [`Ticket`] when it starts. A finished result is only
//! published if no later-started request has already published, so a slow
//! analysis of a previous photo can never overwrite the current one.

use log::debug;

/// Start order of one request within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct AnalysisSession<T> {
    next: u64,
    /// Tickets below this were issued before the last clear
    floor: u64,
    published: Option<(Ticket, T)>,
}

impl<T> Default for AnalysisSession<T> {
    fn default() -> Self {
        Self {
            next: 0,
            floor: 0,
            published: None,
        }
    }
}

impl<T> AnalysisSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request, superseding all earlier ones
    pub fn begin(&mut self) -> Ticket {
        let ticket = Ticket(self.next);
        self.next += 1;
        ticket
    }

    /// Whether a result for `ticket` would still be shown
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 >= self.floor
            && self
                .published
                .as_ref()
                .map_or(true, |(shown, _)| ticket > *shown)
    }

    /// Offer a finished result; returns false if it was discarded as stale
    pub fn publish(&mut self, ticket: Ticket, result: T) -> bool {
        if !self.is_current(ticket) {
            debug!("Discarding stale result for request {}", ticket.0);
            return false;
        }
        self.published = Some((ticket, result));
        true
    }

    /// Run `work` under a fresh ticket and publish its output
    pub fn run<F>(&mut self, work: F) -> Option<&T>
    where
        F: FnOnce() -> T,
    {
        let ticket = self.begin();
        let result = work();
        if self.publish(ticket, result) {
            self.current()
        } else {
            None
        }
    }

    /// The result currently on display
    pub fn current(&self) -> Option<&T> {
        self.published.as_ref().map(|(_, result)| result)
    }

    /// Drop the displayed result and every outstanding request
    pub fn clear(&mut self) {
        self.published = None;
        self.floor = self.next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_started_wins() {
        let mut session = AnalysisSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(session.publish(second, "second photo"));
        // the first request resolves late and must not overwrite
        assert!(!session.publish(first, "first photo"));
        assert_eq!(session.current(), Some(&"second photo"));
    }

    #[test]
    fn test_in_order_results_replace() {
        let mut session = AnalysisSession::new();
        let first = session.begin();
        assert!(session.publish(first, 1));
        let second = session.begin();
        assert!(session.publish(second, 2));
        assert_eq!(session.current(), Some(&2));
    }

    #[test]
    fn test_clear_discards_outstanding() {
        let mut session = AnalysisSession::new();
        let pending = session.begin();
        session.clear();
        assert!(!session.publish(pending, "old"));
        assert_eq!(session.current(), None);

        assert_eq!(session.run(|| "new"), Some(&"new"));
    }
}
