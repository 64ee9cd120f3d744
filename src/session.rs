use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// In-process session state (feature=`lifecycle`).
///
/// Session ids are epoch milliseconds, bumped monotonically when a rotation
/// lands in the same millisecond. Nothing here is persisted; a new process is
/// a new session.
#[derive(Debug)]
pub(crate) struct SessionTracker {
    state: RwLock<SessionState>,
}

#[derive(Clone, Copy, Debug)]
struct SessionState {
    session_id: u64,
    launched: bool,
    backgrounded_at: Option<Instant>,
}

impl SessionTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(SessionState {
                session_id: epoch_millis(),
                launched: false,
                backgrounded_at: None,
            }),
        }
    }

    pub(crate) fn session_id(&self) -> u64 {
        self.read().session_id
    }

    /// Record the launch. Returns whether a launch was already recorded.
    pub(crate) fn mark_launched(&self) -> bool {
        let mut st = self.write();
        let previously = st.launched;
        st.launched = true;
        previously
    }

    pub(crate) fn enter_background(&self, now: Instant) {
        self.write().backgrounded_at = Some(now);
    }

    /// Rotate the session id when the background dwell reached `timeout`.
    ///
    /// Consumes the recorded background instant either way; returns the new id
    /// when a rotation happened.
    pub(crate) fn refresh_if_needed(&self, now: Instant, timeout: Duration) -> Option<u64> {
        let mut st = self.write();
        let backgrounded_at = st.backgrounded_at.take()?;
        if now.duration_since(backgrounded_at) < timeout {
            return None;
        }
        let mut id = epoch_millis();
        if id <= st.session_id {
            id = st.session_id + 1;
        }
        st.session_id = id;
        Some(id)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
