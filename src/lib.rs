//! holdover is a Rust SDK for application background transitions: it requests
//! background-execution extensions from the host OS so pending work (e.g. flushing queued
//! events) can finish before the process is suspended, guards the extension so it is
//! released exactly once, and derives application lifecycle state events.
//!
//! The host capability is abstracted behind [`ExtensionProvider`]: request additional
//! execution time (single attempt, best effort) and end a grant. Two portable providers
//! ship with the crate — [`DenyAllProvider`] for hosts with no such API, and
//! [`HoldOpenProvider`] for hosts where extending lifetime means parking a thread until
//! the guarded work signals completion. Platform bindings implement the same trait.
//!
//! ## Quick start
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use holdover::{HoldOpenProvider, Holdover};
//!
//! fn flush_guarded() -> Result<(), holdover::Error> {
//!     let provider = Arc::new(HoldOpenProvider::new());
//!     let holdover = Holdover::new(provider.clone());
//!
//!     let guard = holdover.guard();
//!     guard.register();
//!
//!     let done = guard.completion();
//!     std::thread::spawn(move || {
//!         // flush pending work, then signal completion
//!         done.finish();
//!     });
//!
//!     let outcome = provider.hold(Duration::from_secs(5))?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Release semantics
//! - At most one extension is outstanding per [`Holdover`]; the underlying token is
//!   ended exactly once per acquisition, whichever of work completion, foreground
//!   return, or host expiration gets there first.
//! - A denied request is an outcome, not an error: the guard stays inactive and the
//!   guarded work simply races the suspension deadline.
//!
//! ## Lifecycle tracking
//! With feature=`lifecycle` (default), feed host events into
//! [`Lifecycle::observe`] to derive `Installed`/`Updated`/`Opened`/`Backgrounded`
//! transitions; the background/foreground edges register and release the guard and
//! rotate the session id after a long enough background dwell.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::dbg_macro)]

mod error;
mod guard;
#[cfg(feature = "lifecycle")]
mod lifecycle;
mod options;
mod provider;
#[cfg(feature = "lifecycle")]
mod session;
mod types;
mod util;

pub use crate::types::guard::{HoldOutcome, RegisterOutcome};
#[cfg(feature = "lifecycle")]
pub use crate::types::lifecycle::{AppEvent, StateTransition};

pub use crate::error::{Error, Result};
pub use crate::guard::{CompletionHandle, Guard};
#[cfg(feature = "lifecycle")]
pub use crate::lifecycle::Lifecycle;
pub use crate::options::HoldoverOptions;
pub use crate::provider::{
    DenyAllProvider, ExpirationCallback, ExtensionProvider, ExtensionToken, HoldOpenProvider,
};

use std::sync::{Arc, Mutex};

/// Primary entrypoint: a background-execution guard plus lifecycle tracking
/// over an injected host provider.
#[derive(Clone, Debug)]
pub struct Holdover {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    opts: HoldoverOptions,
    provider: Arc<dyn ExtensionProvider>,
    registration: Mutex<Option<Arc<guard::Registration>>>,
    #[cfg(feature = "lifecycle")]
    session: session::SessionTracker,
}

impl Holdover {
    /// Build with default options.
    pub fn new(provider: Arc<dyn ExtensionProvider>) -> Self {
        // Default options always validate.
        Self::build(provider, HoldoverOptions::default())
    }

    /// Build with custom options (background gate, session timeout, versions).
    pub fn with_options(
        provider: Arc<dyn ExtensionProvider>,
        opts: HoldoverOptions,
    ) -> Result<Self> {
        opts.validate()?;
        Ok(Self::build(provider, opts))
    }

    fn build(provider: Arc<dyn ExtensionProvider>, opts: HoldoverOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                opts,
                provider,
                registration: Mutex::new(None),
                #[cfg(feature = "lifecycle")]
                session: session::SessionTracker::new(),
            }),
        }
    }

    /// Access background-execution guard APIs.
    pub fn guard(&self) -> Guard {
        Guard::new(self.inner.clone())
    }

    /// Access lifecycle tracking APIs (feature=`lifecycle`).
    #[cfg(feature = "lifecycle")]
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::new(self.inner.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn with_options_rejects_zero_session_timeout() {
        let opts = HoldoverOptions {
            session_timeout: std::time::Duration::from_secs(0),
            ..HoldoverOptions::default()
        };
        let err = Holdover::with_options(Arc::new(DenyAllProvider::new()), opts)
            .expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }

    #[test]
    fn with_options_rejects_control_chars_in_versions() {
        let opts = HoldoverOptions {
            app_version: Some("1.0\n".to_string()),
            ..HoldoverOptions::default()
        };
        let err = Holdover::with_options(Arc::new(DenyAllProvider::new()), opts)
            .expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }
}
