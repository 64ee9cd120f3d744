use super::{ExpirationCallback, ExtensionProvider, ExtensionToken};
use crate::{HoldOutcome, Result};

use std::collections::HashMap;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Provider for hosts without explicit background-task tokens.
///
/// On such hosts, extending process lifetime means parking a thread the host
/// would otherwise use to finish suspension, until the guarded work signals
/// completion or a timeout elapses. `request` therefore always grants;
/// [`HoldOpenProvider::hold`] does the parking.
///
/// Typical wiring: the host's "entering background" hook registers the guard
/// and then calls `hold`; the guarded work's completion handle releases the
/// guard, which ends the token and unparks `hold`.
pub struct HoldOpenProvider {
    state: Mutex<HoldState>,
    wake: Condvar,
}

struct HoldState {
    next_raw: u64,
    open: HashMap<u64, Option<ExpirationCallback>>,
}

impl Default for HoldOpenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldOpenProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HoldState {
                next_raw: 1,
                open: HashMap::new(),
            }),
            wake: Condvar::new(),
        }
    }

    /// Number of extensions granted but not yet ended.
    pub fn open_extensions(&self) -> usize {
        self.lock_state().open.len()
    }

    /// Park the calling thread until every open extension is ended, or until
    /// `timeout` elapses.
    ///
    /// On timeout, all still-open grants are expired: their expiration
    /// callbacks run on this thread (ending the tokens through the guard), and
    /// the result is `HoldOutcome::TimedOut`. A zero timeout is rejected as
    /// `Error::InvalidInput`.
    pub fn hold(&self, timeout: Duration) -> Result<HoldOutcome> {
        crate::util::validate_nonzero("hold timeout", timeout)?;
        let deadline = Instant::now() + timeout;

        let mut st = self.lock_state();
        loop {
            if st.open.is_empty() {
                return Ok(HoldOutcome::Completed);
            }
            let now = Instant::now();
            if now >= deadline {
                let drained: Vec<Option<ExpirationCallback>> =
                    st.open.drain().map(|(_, cb)| cb).collect();
                drop(st);

                #[cfg(feature = "tracing")]
                tracing::warn!(
                    expired = drained.len(),
                    "hold timed out; expiring open extensions"
                );

                for cb in drained.into_iter().flatten() {
                    cb();
                }
                return Ok(HoldOutcome::TimedOut);
            }

            let (guard, _) = self
                .wake
                .wait_timeout(st, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            st = guard;
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, HoldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExtensionProvider for HoldOpenProvider {
    fn request(&self, on_expiration: ExpirationCallback) -> ExtensionToken {
        let mut st = self.lock_state();
        let raw = st.next_raw;
        st.next_raw += 1;
        st.open.insert(raw, Some(on_expiration));
        ExtensionToken::from_raw(raw)
    }

    fn end(&self, token: ExtensionToken) {
        if !token.is_valid() {
            return;
        }
        let mut st = self.lock_state();
        if st.open.remove(&token.raw()).is_some() {
            drop(st);
            self.wake.notify_all();
        }
    }
}

impl fmt::Debug for HoldOpenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoldOpenProvider")
            .field("open", &self.lock_state().open.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Error;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn request_grants_distinct_valid_tokens() {
        let provider = HoldOpenProvider::new();
        let a = provider.request(Box::new(|| {}));
        let b = provider.request(Box::new(|| {}));
        assert!(a.is_valid());
        assert!(b.is_valid());
        assert_ne!(a, b);
        assert_eq!(provider.open_extensions(), 2);
    }

    #[test]
    fn end_is_idempotent_and_ignores_the_sentinel() {
        let provider = HoldOpenProvider::new();
        let token = provider.request(Box::new(|| {}));
        provider.end(ExtensionToken::INVALID);
        provider.end(token);
        provider.end(token);
        assert_eq!(provider.open_extensions(), 0);
    }

    #[test]
    fn hold_returns_completed_when_nothing_is_open() {
        let provider = HoldOpenProvider::new();
        let outcome = provider.hold(Duration::from_millis(10)).expect("ok");
        assert_eq!(outcome, HoldOutcome::Completed);
    }

    #[test]
    fn hold_rejects_zero_timeout() {
        let provider = HoldOpenProvider::new();
        let err = provider.hold(Duration::from_secs(0)).expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }

    #[test]
    fn hold_timeout_fires_expiration_callbacks() {
        let provider = HoldOpenProvider::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let f = fired.clone();
        let _token = provider.request(Box::new(move || {
            f.fetch_add(1, Ordering::SeqCst);
        }));

        let outcome = provider.hold(Duration::from_millis(20)).expect("ok");
        assert_eq!(outcome, HoldOutcome::TimedOut);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(provider.open_extensions(), 0);
    }

    #[test]
    fn hold_unparks_when_the_last_extension_ends() {
        let provider = Arc::new(HoldOpenProvider::new());
        let token = provider.request(Box::new(|| {}));

        let worker = {
            let provider = provider.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                provider.end(token);
            })
        };

        let outcome = provider.hold(Duration::from_secs(5)).expect("ok");
        assert_eq!(outcome, HoldOutcome::Completed);
        worker.join().expect("join");
    }
}
