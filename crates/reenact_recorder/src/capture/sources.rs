//! Input subscription interface.
//!
//! The native event-listening substrate is out of scope; the recorder only
//! depends on this subscription contract. Handlers run on the capture
//! thread, one notice at a time.

use reenact_core::{EventPayload, Point};

/// The classes of input a recorder can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    PointerClick,
    PointerMove,
    KeyDown,
}

/// A single input occurrence delivered to a handler.
#[derive(Clone, Debug, PartialEq)]
pub enum InputNotice {
    /// Pointer click at an absolute surface coordinate.
    Click(Point),
    /// Pointer moved to an absolute surface coordinate.
    Move(Point),
    /// Key pressed, identified by its key value.
    Key(String),
}

impl InputNotice {
    /// The subscription class this notice belongs to.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Click(_) => InputKind::PointerClick,
            Self::Move(_) => InputKind::PointerMove,
            Self::Key(_) => InputKind::KeyDown,
        }
    }

    /// Convert into the event payload a recorder stores.
    pub fn into_payload(self) -> EventPayload {
        match self {
            Self::Click(p) => EventPayload::PointerClick { x: p.x, y: p.y },
            Self::Move(p) => EventPayload::PointerMove { x: p.x, y: p.y },
            Self::Key(key) => EventPayload::Key { key },
        }
    }
}

/// Callback invoked for each matching input occurrence.
pub type InputHandler = Box<dyn FnMut(InputNotice) + Send>;

/// Opaque handle to an active subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    /// Mint a token. Sources choose their own numbering.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// An input substrate the recorder can subscribe to.
pub trait InputSource: Send + Sync {
    /// Register a handler for one class of input.
    fn subscribe(&self, kind: InputKind, handler: InputHandler) -> SubscriptionToken;

    /// Remove a previously registered handler. Unknown tokens are ignored.
    fn unsubscribe(&self, token: SubscriptionToken);
}
