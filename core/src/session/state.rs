//! session/state.rs
use std::fmt;

/// `Opening -> Open -> Finalizing -> Closed`, with `Errored` reachable from
/// the first three.
///
/// `Opening` and `Finalizing` are transient: they only exist inside `open`
/// and `finalize`, so `BzipSession::state` never reports them. `Finalizing`
/// can still show up in a `SequenceError` raised mid-finalize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Opening,
    Open,
    Finalizing,
    Closed,
    Errored,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Opening    => "opening",
            SessionState::Open       => "open",
            SessionState::Finalizing => "finalizing",
            SessionState::Closed     => "closed",
            SessionState::Errored    => "errored",
        };
        f.write_str(name)
    }
}
