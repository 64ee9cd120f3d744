/// Result of `Guard::register`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RegisterOutcome {
    /// The host granted additional execution time; the guard is now active.
    Granted,
    /// The host refused the request. Best effort only: the guarded work should
    /// still run, it just races the suspension deadline.
    Denied,
    /// Background mode is disabled in `HoldoverOptions`; no request was made.
    Disabled,
    /// A previous extension is still active; the call was a no-op.
    AlreadyActive,
}

impl RegisterOutcome {
    /// Whether the guard holds an active extension after this call.
    pub fn is_active(self) -> bool {
        matches!(self, RegisterOutcome::Granted | RegisterOutcome::AlreadyActive)
    }
}

/// Result of `HoldOpenProvider::hold`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum HoldOutcome {
    /// Every open extension was ended before the timeout.
    Completed,
    /// The timeout elapsed first; expiration callbacks were invoked.
    TimedOut,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn is_active_tracks_live_outcomes() {
        assert!(RegisterOutcome::Granted.is_active());
        assert!(RegisterOutcome::AlreadyActive.is_active());
        assert!(!RegisterOutcome::Denied.is_active());
        assert!(!RegisterOutcome::Disabled.is_active());
    }
}
