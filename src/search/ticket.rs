/// Identifier handed to an asynchronous request when it is issued.
pub type RequestId = u64;

/// Monotonic request counter enforcing last-issued-wins.
///
/// Every issued request gets a fresh id. A completion is applied only if its
/// id is still the newest one; anything older is stale and gets dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestWins {
    current: RequestId,
}

impl LatestWins {
    pub fn issue(&mut self) -> RequestId {
        self.current += 1;
        self.current
    }

    /// Invalidate whatever is in flight without issuing a new request.
    pub fn supersede(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id == self.current
    }

    pub fn current(&self) -> RequestId {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_newest_ticket_is_current() {
        let mut tickets = LatestWins::default();
        let a = tickets.issue();
        let b = tickets.issue();
        assert!(a < b);
        assert!(!tickets.is_current(a));
        assert!(tickets.is_current(b));
    }

    #[test]
    fn test_supersede_invalidates_in_flight() {
        let mut tickets = LatestWins::default();
        let a = tickets.issue();
        tickets.supersede();
        assert!(!tickets.is_current(a));
        assert!(tickets.issue() > a);
    }
}
