mod deny;
mod hold_open;

pub use deny::DenyAllProvider;
pub use hold_open::HoldOpenProvider;

use std::fmt;

/// Opaque identifier for a host-granted background-execution extension.
///
/// `ExtensionToken::INVALID` is the "request denied" sentinel; every other
/// value identifies a live grant until it is passed back to
/// `ExtensionProvider::end`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionToken(u64);

impl ExtensionToken {
    /// Sentinel returned when the host denies additional execution time.
    pub const INVALID: ExtensionToken = ExtensionToken(0);

    pub const fn from_raw(raw: u64) -> Self {
        ExtensionToken(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for ExtensionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExtensionToken({})", self.0)
        } else {
            write!(f, "ExtensionToken(invalid)")
        }
    }
}

/// Callback invoked by the host shortly before a granted extension runs out.
///
/// Fires at most once per grant, possibly on a different thread than the one
/// that requested the extension.
pub type ExpirationCallback = Box<dyn FnOnce() + Send + 'static>;

/// Host capability for granting extra execution time past the background
/// suspension deadline.
///
/// Implementations adapt one platform's process-lifetime API. Two portable
/// implementations ship with the crate: [`DenyAllProvider`] for hosts with no
/// such API, and [`HoldOpenProvider`] for hosts where "extension" means
/// parking a thread until the guarded work signals completion.
pub trait ExtensionProvider: Send + Sync + fmt::Debug {
    /// Ask the host for additional execution time.
    ///
    /// Single attempt, never retried. Returns `ExtensionToken::INVALID` when
    /// the host refuses; `on_expiration` is dropped unfired in that case.
    fn request(&self, on_expiration: ExpirationCallback) -> ExtensionToken;

    /// Return a previously granted extension to the host.
    ///
    /// Must be idempotent: ending `INVALID` or an already-ended token is a
    /// no-op.
    fn end(&self, token: ExtensionToken);
}
