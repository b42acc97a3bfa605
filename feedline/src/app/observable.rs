//! Observable/observer primitive
//!
//! Single-threaded publish-subscribe used by the view model to tell views
//! that its state changed. Observers are held by identity (`Rc` pointer),
//! notified in registration order, and isolated from each other's failures.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::error::ObserverError;

/// Receives state snapshots from an [`Observable`]
pub trait Observer<T> {
    fn update(&self, snapshot: &T) -> Result<(), ObserverError>;
}

/// Identifies one registration within an observable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Registry<T> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Rc<dyn Observer<T>>)>,
}

impl<T> Registry<T> {
    fn position_of(&self, observer: &Rc<dyn Observer<T>>) -> Option<usize> {
        let target = Rc::as_ptr(observer) as *const ();
        self.observers
            .iter()
            .position(|(_, o)| Rc::as_ptr(o) as *const () == target)
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }
}

/// Outcome of a notification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// A set of observers interested in snapshots of `T`
pub struct Observable<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Observable<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Register an observer.
    ///
    /// Returns `None` if this exact observer (same allocation) is already
    /// registered; the existing registration is left untouched.
    pub fn subscribe(&self, observer: Rc<dyn Observer<T>>) -> Option<Subscription<T>> {
        let mut registry = self.registry.borrow_mut();
        if registry.position_of(&observer).is_some() {
            tracing::debug!("observer already subscribed");
            return None;
        }

        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.observers.push((id, observer));

        Some(Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        })
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `snapshot` to every observer registered when the pass starts.
    ///
    /// Errors and panics from one observer are logged and never stop the
    /// pass. Observers may subscribe or unsubscribe from inside `update`;
    /// the change applies to the next pass.
    pub fn notify(&self, snapshot: &T) -> NotifyReport {
        let observers: Vec<(SubscriptionId, Rc<dyn Observer<T>>)> =
            self.registry.borrow().observers.clone();

        let mut report = NotifyReport::default();
        for (id, observer) in observers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| observer.update(snapshot)))
                .unwrap_or_else(|payload| Err(ObserverError::Panicked(panic_message(&*payload))));

            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(subscription = id.0, error = %e, "observer failed");
                }
            }
        }
        report
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration handle. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes the observer"]
pub struct Subscription<T> {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unsubscribe now
    pub fn cancel(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // A pass in progress holds no borrow, so this cannot conflict.
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.remove(self.id);
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
