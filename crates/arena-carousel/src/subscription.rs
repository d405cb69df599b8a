//! Selection listeners and scoped subscriptions.
//!
//! A viewport keeps its listeners in a shared [`ListenerRegistry`]. Each
//! registration hands back a [`Subscription`] guard; dropping the guard
//! removes the listener, so teardown cannot forget to unsubscribe.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Callback invoked with the newly selected index
pub type SelectListener = Box<dyn Fn(usize)>;

/// Registry handle shared between a viewport and its subscriptions
pub type SharedListeners = Rc<RefCell<ListenerRegistry>>;

/// Ordered set of selection listeners
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn(usize)>)>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners_count", &self.listeners.len())
            .finish()
    }
}

impl ListenerRegistry {
    /// Create an empty shared registry
    #[must_use]
    pub fn shared() -> SharedListeners {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Number of live listeners
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn insert(&mut self, listener: SelectListener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Rc::from(listener)));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

/// Register `listener` and return its guard
pub fn subscribe(registry: &SharedListeners, listener: SelectListener) -> Subscription {
    let id = registry.borrow_mut().insert(listener);
    Subscription {
        registry: Rc::downgrade(registry),
        id,
    }
}

/// Notify every listener of a selection change.
///
/// Listeners are snapshotted first, so a listener may subscribe or
/// unsubscribe while being notified.
pub fn emit(registry: &SharedListeners, index: usize) {
    let snapshot: Vec<Rc<dyn Fn(usize)>> = registry
        .borrow()
        .listeners
        .iter()
        .map(|(_, l)| Rc::clone(l))
        .collect();
    for listener in snapshot {
        listener(index);
    }
}

/// Guard that keeps a listener registered until dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<RefCell<ListenerRegistry>>,
    id: u64,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Listener id within its registry
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Whether the listener is still registered
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().listeners.iter().any(|(id, _)| *id == self.id))
    }

    /// Unsubscribe now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}
