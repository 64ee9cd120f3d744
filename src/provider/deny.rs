use super::{ExpirationCallback, ExtensionProvider, ExtensionToken};

/// Provider for hosts with no background-execution API.
///
/// Every request is denied, so the guard runs in its best-effort degraded mode
/// everywhere the crate compiles. Useful as a default wiring on server/desktop
/// targets and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAllProvider;

impl DenyAllProvider {
    pub fn new() -> Self {
        DenyAllProvider
    }
}

impl ExtensionProvider for DenyAllProvider {
    fn request(&self, _on_expiration: ExpirationCallback) -> ExtensionToken {
        ExtensionToken::INVALID
    }

    fn end(&self, _token: ExtensionToken) {}
}
