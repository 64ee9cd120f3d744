use std::time::Duration;

/// Configuration options for `Holdover`.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct HoldoverOptions {
    /// Whether background transitions request an execution extension at all.
    ///
    /// When `false`, `Guard::register` is a no-op returning
    /// `RegisterOutcome::Disabled`.
    pub enabled: bool,

    /// Inactivity window after which a background/foreground round trip starts
    /// a new session (feature=`lifecycle`).
    pub session_timeout: Duration,

    /// Whether returning to the foreground releases a still-active extension
    /// (feature=`lifecycle`).
    pub release_on_foreground: bool,

    /// Current application version, attached to lifecycle transitions
    /// (feature=`lifecycle`).
    pub app_version: Option<String>,

    /// Application version seen on the previous run, if the caller knows it.
    ///
    /// `None` means fresh install. Persisting this across runs is the caller's
    /// concern (feature=`lifecycle`).
    pub previous_app_version: Option<String>,
}

impl Default for HoldoverOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            session_timeout: Duration::from_secs(300),
            release_on_foreground: true,
            app_version: None,
            previous_app_version: None,
        }
    }
}

impl HoldoverOptions {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        crate::util::validate_nonzero("session_timeout", self.session_timeout)?;
        if let Some(v) = &self.app_version {
            crate::util::validate_no_control("app_version", v)?;
        }
        if let Some(v) = &self.previous_app_version {
            crate::util::validate_no_control("previous_app_version", v)?;
        }
        Ok(())
    }
}
