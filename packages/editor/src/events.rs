//! What the host surface sends in, and what the session hands back.

use crate::document::NodeId;
use crate::snap::{Rect, SnapDelta};
use serde::{Deserialize, Serialize};
use storefront_content::{AssetLoadError, ElementId, Offset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Char(char),
    Other(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Input from the embedded document
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Click { target: NodeId },
    DoubleClick { target: NodeId },
    /// `rect` is the target's current box in viewport pixels
    PointerDown { target: NodeId, x: f64, y: f64, rect: Rect },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Full current text of the node being edited
    TextInput { text: String },
    Blur,
    KeyDown { key: Key, modifiers: Modifiers },
    /// An image in the preview failed to load
    AssetLoadFailed { target: NodeId, error: AssetLoadError },
}

/// Transient visual feedback for the host to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Selection(Option<ElementId>),
    Drag {
        id: ElementId,
        offset: Offset,
        delta: SnapDelta,
        snapped_x: bool,
        snapped_y: bool,
    },
    Moved { id: ElementId, offset: Offset },
    Editing(ElementId),
}

/// The one notification that crosses into the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostNotification {
    ContentEdited { id: ElementId, text: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    /// The session captured the event; the host must not act on it
    pub consumed: bool,
    pub feedback: Option<Feedback>,
    pub notifications: Vec<HostNotification>,
}

impl EventOutcome {
    pub fn pass_through() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn with_notification(mut self, notification: HostNotification) -> Self {
        self.notifications.push(notification);
        self
    }
}
