/// Host application lifecycle event (feature=`lifecycle`).
///
/// These mirror the platform notifications a mobile/desktop host emits around
/// foreground/background transitions. `from_notification` maps the well-known
/// UIKit/AppKit notification names; callers on other hosts construct variants
/// directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum AppEvent {
    DidFinishLaunching,
    DidBecomeActive,
    DidEnterBackground,
    WillEnterForeground,
}

impl AppEvent {
    /// Map a platform notification name to an event, if it is one we track.
    pub fn from_notification(name: &str) -> Option<Self> {
        match name {
            "UIApplicationDidFinishLaunchingNotification"
            | "NSApplicationDidFinishLaunchingNotification" => Some(AppEvent::DidFinishLaunching),
            "UIApplicationDidBecomeActiveNotification"
            | "NSApplicationDidBecomeActiveNotification" => Some(AppEvent::DidBecomeActive),
            "UIApplicationDidEnterBackgroundNotification"
            | "NSApplicationDidHideNotification" => Some(AppEvent::DidEnterBackground),
            "UIApplicationWillEnterForegroundNotification"
            | "NSApplicationDidUnhideNotification" => Some(AppEvent::WillEnterForeground),
            _ => None,
        }
    }
}

/// Application state transition derived from lifecycle events (feature=`lifecycle`).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StateTransition {
    /// First launch on this device (no previous version known).
    Installed { version: Option<String> },
    /// Launch after a version change.
    Updated {
        previous_version: Option<String>,
        version: Option<String>,
    },
    /// The application moved to the foreground.
    Opened {
        from_background: bool,
        version: Option<String>,
    },
    /// The application moved to the background.
    Backgrounded,
}

impl StateTransition {
    /// Conventional event name for this transition.
    pub fn event_name(&self) -> &'static str {
        match self {
            StateTransition::Installed { .. } => "Application Installed",
            StateTransition::Updated { .. } => "Application Updated",
            StateTransition::Opened { .. } => "Application Opened",
            StateTransition::Backgrounded => "Application Backgrounded",
        }
    }
}
