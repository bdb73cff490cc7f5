//! Scripted input source and in-memory capture sink.

use parking_lot::Mutex;
use reenact_core::{Point, Result};
use rustc_hash::FxHashMap;

use crate::capture::{CaptureSink, InputHandler, InputKind, InputNotice, InputSource, SubscriptionToken};

#[derive(Default)]
struct ScriptInner {
    next_token: u64,
    handlers: FxHashMap<u64, (InputKind, InputHandler)>,
}

/// An `InputSource` tests drive by hand.
///
/// Subscribed handlers are invoked synchronously from `emit_*`, one notice
/// at a time, in subscription order.
#[derive(Default)]
pub struct ScriptedInput {
    inner: Mutex<ScriptInner>,
}

impl ScriptedInput {
    /// Create a source with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently active subscriptions.
    pub fn live_subscriptions(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Deliver a notice to every handler subscribed to its kind.
    pub fn emit(&self, notice: InputNotice) {
        let mut inner = self.inner.lock();
        let mut tokens: Vec<u64> = inner
            .handlers
            .iter()
            .filter(|(_, (kind, _))| *kind == notice.kind())
            .map(|(token, _)| *token)
            .collect();
        tokens.sort_unstable();
        for token in tokens {
            if let Some((_, handler)) = inner.handlers.get_mut(&token) {
                handler(notice.clone());
            }
        }
    }

    /// Fire a pointer click.
    pub fn emit_click(&self, position: Point) {
        self.emit(InputNotice::Click(position));
    }

    /// Fire a pointer move.
    pub fn emit_move(&self, position: Point) {
        self.emit(InputNotice::Move(position));
    }

    /// Fire a key press.
    pub fn emit_key(&self, key: &str) {
        self.emit(InputNotice::Key(key.to_string()));
    }
}

impl InputSource for ScriptedInput {
    fn subscribe(&self, kind: InputKind, handler: InputHandler) -> SubscriptionToken {
        let mut inner = self.inner.lock();
        let token = inner.next_token;
        inner.next_token += 1;
        inner.handlers.insert(token, (kind, handler));
        SubscriptionToken::from_raw(token)
    }

    fn unsubscribe(&self, token: SubscriptionToken) {
        self.inner.lock().handlers.remove(&token.as_raw());
    }
}

/// A `CaptureSink` that keeps serialized logs in memory.
#[derive(Default)]
pub struct MemorySink {
    persisted: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted logs.
    pub fn count(&self) -> usize {
        self.persisted.lock().len()
    }

    /// Drain everything persisted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.persisted.lock())
    }
}

impl CaptureSink for MemorySink {
    fn persist(&self, serialized: &str) -> Result<()> {
        self.persisted.lock().push(serialized.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;
    use std::sync::Arc;

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let source = ScriptedInput::new();
        let clicks = Arc::new(PlMutex::new(0usize));
        let keys = Arc::new(PlMutex::new(0usize));

        let clicks_seen = clicks.clone();
        source.subscribe(
            InputKind::PointerClick,
            Box::new(move |_| *clicks_seen.lock() += 1),
        );
        let keys_seen = keys.clone();
        source.subscribe(
            InputKind::KeyDown,
            Box::new(move |_| *keys_seen.lock() += 1),
        );

        source.emit_click(Point::new(1.0, 1.0));
        source.emit_click(Point::new(2.0, 2.0));
        source.emit_key("a");

        assert_eq!(*clicks.lock(), 2);
        assert_eq!(*keys.lock(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let source = ScriptedInput::new();
        let seen = Arc::new(PlMutex::new(0usize));
        let seen_in = seen.clone();
        let token = source.subscribe(
            InputKind::PointerMove,
            Box::new(move |_| *seen_in.lock() += 1),
        );
        assert_eq!(source.live_subscriptions(), 1);

        source.emit_move(Point::new(1.0, 1.0));
        source.unsubscribe(token);
        source.emit_move(Point::new(2.0, 2.0));

        assert_eq!(*seen.lock(), 1);
        assert_eq!(source.live_subscriptions(), 0);
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        sink.persist("{}").unwrap();
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.take(), vec!["{}".to_string()]);
        assert_eq!(sink.count(), 0);
    }
}
