//! Tracking of fire-and-forget requests to the host
//!
//! Quick-fix, completion and hover requests carry no correlation id on the
//! wire, so the host is assumed to answer one request of each kind at a
//! time. The ledger records the outstanding position per kind so superseded
//! and unsolicited traffic shows up in the logs. It never blocks delivery:
//! every response still reaches the core.

use std::cell::Cell;

use tracing::debug;

/// Request kinds answered asynchronously by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    QuickFixes,
    Completions,
    Hover,
}

impl RequestKind {
    fn index(self) -> usize {
        match self {
            Self::QuickFixes => 0,
            Self::Completions => 1,
            Self::Hover => 2,
        }
    }
}

/// Line/column a request was issued at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPosition {
    pub line: usize,
    pub col: usize,
}

/// What the ledger knew when a response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMatch {
    /// A request of this kind was outstanding at the given position
    Answered(RequestPosition),
    /// Nothing of this kind was outstanding
    Unsolicited,
}

/// Single outstanding request per kind.
///
/// Uses `Cell` so the host side (recording requests) and the dispatcher
/// (settling them) can share it behind an `Rc` while core callbacks fire
/// mid-dispatch.
#[derive(Debug, Default)]
pub struct RequestLedger {
    outstanding: [Cell<Option<RequestPosition>>; 3],
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request. Returns the request it superseded, if any.
    pub fn issue(&self, kind: RequestKind, line: usize, col: usize) -> Option<RequestPosition> {
        let position = RequestPosition { line, col };
        let previous = self.outstanding[kind.index()].replace(Some(position));
        if let Some(previous) = previous {
            debug!(
                ?kind,
                previous_line = previous.line,
                previous_col = previous.col,
                line,
                col,
                "request superseded before the host answered"
            );
        }
        previous
    }

    /// Settle the outstanding request of `kind`
    pub fn settle(&self, kind: RequestKind) -> ResponseMatch {
        match self.outstanding[kind.index()].take() {
            Some(position) => ResponseMatch::Answered(position),
            None => {
                debug!(?kind, "response with no outstanding request");
                ResponseMatch::Unsolicited
            }
        }
    }

    /// Whether a request of `kind` is waiting for the host
    pub fn is_outstanding(&self, kind: RequestKind) -> bool {
        let position = self.outstanding[kind.index()].get();
        position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_settle() {
        let ledger = RequestLedger::new();
        assert_eq!(ledger.issue(RequestKind::Completions, 4, 2), None);
        assert!(ledger.is_outstanding(RequestKind::Completions));
        assert!(!ledger.is_outstanding(RequestKind::Hover));

        assert_eq!(
            ledger.settle(RequestKind::Completions),
            ResponseMatch::Answered(RequestPosition { line: 4, col: 2 })
        );
        assert!(!ledger.is_outstanding(RequestKind::Completions));
    }

    #[test]
    fn test_newer_request_supersedes() {
        let ledger = RequestLedger::new();
        ledger.issue(RequestKind::Hover, 1, 1);
        assert_eq!(
            ledger.issue(RequestKind::Hover, 1, 5),
            Some(RequestPosition { line: 1, col: 1 })
        );
        assert_eq!(
            ledger.settle(RequestKind::Hover),
            ResponseMatch::Answered(RequestPosition { line: 1, col: 5 })
        );
    }

    #[test]
    fn test_unsolicited_response() {
        let ledger = RequestLedger::new();
        ledger.issue(RequestKind::QuickFixes, 0, 0);
        assert_eq!(ledger.settle(RequestKind::Completions), ResponseMatch::Unsolicited);
        assert!(ledger.is_outstanding(RequestKind::QuickFixes));
    }
}
