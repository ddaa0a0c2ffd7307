//! Selection bridge for the 3D segment view
//!
//! The externally hosted 3D view reports clicks as two strings: a segment
//! id and a selected flag (`"true"`/`"false"`). The bridge turns those into
//! a typed [`SegmentSelection`] and hands it to the one view currently
//! subscribed.
//!
//! Subscribing returns a [`Subscription`] guard. Dropping the guard
//! deregisters the handler, so a view that owns its guard is always
//! deregistered on teardown. A newer subscription replaces an older one;
//! the older guard then becomes inert.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use segment_studio_config::Settings;
use segment_studio_core::{AttributeBreakdown, AttributeTable};
use serde::{Deserialize, Serialize};

/// A click in the 3D view, resolved against the attribute table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSelection {
    /// Id as reported by the view
    pub segment_id: String,
    pub selected: bool,
    /// Breakdown for the id, or the fallback attribute's breakdown
    pub attribute: AttributeBreakdown,
}

type Handler = Arc<dyn Fn(&SegmentSelection) + Send + Sync>;

struct ActiveHandler {
    id: u64,
    handler: Handler,
}

struct BridgeInner {
    active: Mutex<Option<ActiveHandler>>,
    next_id: AtomicU64,
    attributes: AttributeTable,
}

/// Single-subscriber relay from the 3D view to the owning screen
#[derive(Clone)]
pub struct SegmentClickBridge {
    inner: Arc<BridgeInner>,
}

impl SegmentClickBridge {
    pub fn new(attributes: AttributeTable) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                active: Mutex::new(None),
                next_id: AtomicU64::new(1),
                attributes,
            }),
        }
    }

    /// Bridge resolving ids with the configured fallback attribute
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.attribute_table())
    }

    /// Register the handler, replacing any existing one
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SegmentSelection) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = self.inner.active.lock().replace(ActiveHandler {
            id,
            handler: Arc::new(handler),
        });

        if let Some(previous) = previous {
            tracing::debug!(
                replaced = previous.id,
                subscription = id,
                "Replaced segment click subscriber"
            );
        }

        Subscription {
            id,
            bridge: Arc::downgrade(&self.inner),
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.inner.active.lock().is_some()
    }

    /// Relay a click from the 3D view
    ///
    /// Returns whether a subscriber received it.
    pub fn dispatch(&self, segment_id: &str, selected: &str) -> bool {
        let handler = match self.inner.active.lock().as_ref() {
            Some(active) => Arc::clone(&active.handler),
            None => {
                tracing::debug!(segment_id, "Segment click with no subscriber");
                return false;
            }
        };

        let attribute = match self.inner.attributes.lookup(segment_id) {
            Some(attribute) => attribute.clone(),
            None => {
                tracing::warn!(
                    segment_id,
                    fallback = self.inner.attributes.fallback_id(),
                    "No attribute breakdown, dropping segment click"
                );
                return false;
            }
        };

        let selection = SegmentSelection {
            segment_id: segment_id.to_string(),
            selected: parse_flag(selected),
            attribute,
        };

        // Called outside the lock so the handler may resubscribe
        handler(&selection);
        true
    }
}

impl Default for SegmentClickBridge {
    fn default() -> Self {
        Self::new(AttributeTable::builtin().clone())
    }
}

fn parse_flag(flag: &str) -> bool {
    match flag {
        "true" => true,
        "false" => false,
        other => {
            tracing::warn!(flag = other, "Unrecognized selection flag, treating as false");
            false
        }
    }
}

/// Registration guard; dropping it deregisters the handler
#[must_use = "dropping the subscription deregisters the handler immediately"]
pub struct Subscription {
    id: u64,
    bridge: Weak<BridgeInner>,
}

impl Subscription {
    /// Whether this is still the bridge's active subscriber
    pub fn is_active(&self) -> bool {
        let Some(inner) = self.bridge.upgrade() else {
            return false;
        };
        let active = inner.active.lock();
        matches!(active.as_ref(), Some(a) if a.id == self.id)
    }

    /// Deregister now
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.bridge.upgrade() else {
            return;
        };
        let mut active = inner.active.lock();
        if matches!(active.as_ref(), Some(a) if a.id == self.id) {
            *active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_bridge() -> (SegmentClickBridge, Arc<Mutex<Vec<SegmentSelection>>>) {
        (SegmentClickBridge::default(), Arc::new(Mutex::new(Vec::new())))
    }

    #[test]
    fn test_dispatch_without_subscriber() {
        let bridge = SegmentClickBridge::default();
        assert!(!bridge.dispatch("digital-engagement", "true"));
    }

    #[test]
    fn test_dispatch_delivers_selection() {
        let (bridge, seen) = recording_bridge();
        let sink = Arc::clone(&seen);
        let _sub = bridge.subscribe(move |sel| sink.lock().push(sel.clone()));

        assert!(bridge.dispatch("digital-engagement", "true"));
        assert!(bridge.dispatch("life-stage", "false"));

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].selected);
        assert_eq!(seen[0].attribute.id, "digital-engagement");
        assert!(!seen[1].selected);
    }

    #[test]
    fn test_unknown_segment_falls_back() {
        let (bridge, seen) = recording_bridge();
        let sink = Arc::clone(&seen);
        let _sub = bridge.subscribe(move |sel| sink.lock().push(sel.clone()));

        bridge.dispatch("mystery-segment", "true");
        let seen = seen.lock();
        assert_eq!(seen[0].segment_id, "mystery-segment");
        assert_eq!(seen[0].attribute.id, "financial-capacity");
    }

    #[test]
    fn test_missing_fallback_drops_click() {
        let bridge = SegmentClickBridge::new(AttributeTable::builtin().with_fallback("retired"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = bridge.subscribe(move |sel| sink.lock().push(sel.clone()));

        assert!(!bridge.dispatch("mystery-segment", "true"));
        assert!(bridge.dispatch("life-stage", "true"));
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_unrecognized_flag_is_false() {
        let (bridge, seen) = recording_bridge();
        let sink = Arc::clone(&seen);
        let _sub = bridge.subscribe(move |sel| sink.lock().push(sel.clone()));

        bridge.dispatch("life-stage", "TRUE");
        bridge.dispatch("life-stage", "1");
        assert!(seen.lock().iter().all(|s| !s.selected));
    }

    #[test]
    fn test_drop_deregisters() {
        let bridge = SegmentClickBridge::default();
        {
            let sub = bridge.subscribe(|_| {});
            assert!(sub.is_active());
            assert!(bridge.has_subscriber());
        }
        assert!(!bridge.has_subscriber());
        assert!(!bridge.dispatch("life-stage", "true"));
    }

    #[test]
    fn test_at_most_one_subscriber() {
        let (bridge, seen) = recording_bridge();
        let first = bridge.subscribe(|_| panic!("stale subscriber was called"));

        let second_sink = Arc::clone(&seen);
        let second = bridge.subscribe(move |sel| second_sink.lock().push(sel.clone()));

        assert!(!first.is_active());
        assert!(second.is_active());

        bridge.dispatch("risk-tolerance", "true");
        assert_eq!(seen.lock().len(), 1);
        assert_eq!(seen.lock()[0].attribute.id, "risk-tolerance");

        // Dropping the stale guard must not remove the live subscriber
        drop(first);
        assert!(bridge.has_subscriber());

        second.unsubscribe();
        assert!(!bridge.has_subscriber());
    }

    #[test]
    fn test_handler_may_resubscribe() {
        let bridge = SegmentClickBridge::default();
        let inner_bridge = bridge.clone();
        let holder: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&holder);

        let _sub = bridge.subscribe(move |_| {
            *slot.lock() = Some(inner_bridge.subscribe(|_| {}));
        });

        assert!(bridge.dispatch("life-stage", "true"));
        assert!(holder.lock().as_ref().unwrap().is_active());
    }

    #[test]
    fn test_guard_outlives_bridge() {
        let bridge = SegmentClickBridge::default();
        let sub = bridge.subscribe(|_| {});
        drop(bridge);
        assert!(!sub.is_active());
        drop(sub);
    }
}
