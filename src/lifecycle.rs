use crate::{AppEvent, StateTransition};

use std::sync::Arc;
use std::time::Instant;

/// Application lifecycle APIs (feature=`lifecycle`).
///
/// Feed host lifecycle events through [`Lifecycle::observe`]; the returned
/// transitions are what an instrumentation layer would record, and the
/// background/foreground edges drive the execution guard: entering the
/// background registers an extension, returning to the foreground releases it
/// (when `release_on_foreground`) and refreshes the session after a long
/// enough dwell.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    inner: Arc<crate::Inner>,
}

impl Lifecycle {
    pub(crate) fn new(inner: Arc<crate::Inner>) -> Self {
        Self { inner }
    }

    /// Feed one host lifecycle event; returns the derived transitions.
    pub fn observe(&self, event: AppEvent) -> Vec<StateTransition> {
        match event {
            AppEvent::DidFinishLaunching => self.on_launch(),
            AppEvent::DidBecomeActive => Vec::new(),
            AppEvent::DidEnterBackground => self.on_background(),
            AppEvent::WillEnterForeground => self.on_foreground(),
        }
    }

    /// Current session id (epoch milliseconds at session start).
    pub fn session_id(&self) -> u64 {
        self.inner.session.session_id()
    }

    fn on_launch(&self) -> Vec<StateTransition> {
        if self.inner.session.mark_launched() {
            #[cfg(feature = "tracing")]
            tracing::debug!("duplicate launch event ignored");
            return Vec::new();
        }

        let version = self.inner.opts.app_version.clone();
        let mut transitions = Vec::new();
        match (&self.inner.opts.previous_app_version, &version) {
            (None, _) => transitions.push(StateTransition::Installed {
                version: version.clone(),
            }),
            (Some(previous), Some(current)) if previous != current => {
                transitions.push(StateTransition::Updated {
                    previous_version: Some(previous.clone()),
                    version: Some(current.clone()),
                });
            }
            _ => {}
        }
        transitions.push(StateTransition::Opened {
            from_background: false,
            version,
        });
        transitions
    }

    fn on_background(&self) -> Vec<StateTransition> {
        self.inner.session.enter_background(Instant::now());
        let _outcome = crate::Guard::new(self.inner.clone()).register();
        vec![StateTransition::Backgrounded]
    }

    fn on_foreground(&self) -> Vec<StateTransition> {
        if let Some(_session_id) = self
            .inner
            .session
            .refresh_if_needed(Instant::now(), self.inner.opts.session_timeout)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                session_id = _session_id,
                "session refreshed after background dwell"
            );
        }

        if self.inner.opts.release_on_foreground {
            crate::Guard::new(self.inner.clone()).release();
        }

        vec![StateTransition::Opened {
            from_background: true,
            version: self.inner.opts.app_version.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::provider::DenyAllProvider;
    use crate::{Holdover, HoldoverOptions};

    use std::sync::Arc;

    fn holdover_with(opts: HoldoverOptions) -> Holdover {
        Holdover::with_options(Arc::new(DenyAllProvider::new()), opts).expect("ok")
    }

    #[test]
    fn fresh_install_yields_installed_then_opened() {
        let opts = HoldoverOptions {
            app_version: Some("1.0.0".to_string()),
            ..HoldoverOptions::default()
        };
        let transitions = holdover_with(opts)
            .lifecycle()
            .observe(AppEvent::DidFinishLaunching);

        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].event_name(), "Application Installed");
        assert_eq!(
            transitions[1],
            StateTransition::Opened {
                from_background: false,
                version: Some("1.0.0".to_string()),
            }
        );
    }

    #[test]
    fn version_change_yields_updated() {
        let opts = HoldoverOptions {
            app_version: Some("1.1.0".to_string()),
            previous_app_version: Some("1.0.0".to_string()),
            ..HoldoverOptions::default()
        };
        let transitions = holdover_with(opts)
            .lifecycle()
            .observe(AppEvent::DidFinishLaunching);

        assert_eq!(transitions[0].event_name(), "Application Updated");
    }

    #[test]
    fn same_version_launch_yields_opened_only() {
        let opts = HoldoverOptions {
            app_version: Some("1.0.0".to_string()),
            previous_app_version: Some("1.0.0".to_string()),
            ..HoldoverOptions::default()
        };
        let transitions = holdover_with(opts)
            .lifecycle()
            .observe(AppEvent::DidFinishLaunching);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].event_name(), "Application Opened");
    }

    #[test]
    fn duplicate_launch_events_are_ignored() {
        let holdover = holdover_with(HoldoverOptions::default());
        let lifecycle = holdover.lifecycle();

        assert!(!lifecycle.observe(AppEvent::DidFinishLaunching).is_empty());
        assert!(lifecycle.observe(AppEvent::DidFinishLaunching).is_empty());
    }

    #[test]
    fn became_active_yields_nothing() {
        let holdover = holdover_with(HoldoverOptions::default());
        assert!(holdover.lifecycle().observe(AppEvent::DidBecomeActive).is_empty());
    }

    #[test]
    fn background_then_foreground_round_trip() {
        let holdover = holdover_with(HoldoverOptions::default());
        let lifecycle = holdover.lifecycle();

        let backgrounded = lifecycle.observe(AppEvent::DidEnterBackground);
        assert_eq!(backgrounded, vec![StateTransition::Backgrounded]);

        let opened = lifecycle.observe(AppEvent::WillEnterForeground);
        assert_eq!(
            opened,
            vec![StateTransition::Opened {
                from_background: true,
                version: None,
            }]
        );
    }
}
