// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Listener attach/notify plumbing.
//!
//! A [`Subject`] owns its listeners and fans events out to them in
//! attachment order. The callback hands each listener the subject
//! itself, so listeners may detach (themselves or others) or attach
//! new listeners while a notification is in flight; see the method
//! docs for the exact re-entrancy rules.

use std::cell::RefCell;
use std::fmt;

/// Identifies an attached listener for later detachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A synchronous observer of search events.
pub trait SearchListener<E> {
    /// Called once per notification cycle with the published event.
    ///
    /// `subject` is the notifying subject; listeners may call
    /// [`Subject::attach`] and [`Subject::detach`] on it from inside
    /// this callback.
    fn update(&mut self, subject: &Subject<E>, event: &E);

    /// A short identifier for diagnostics.
    fn name(&self) -> &str {
        "SearchListener"
    }
}

impl<'a, E> fmt::Debug for dyn SearchListener<E> + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchListener({})", self.name())
    }
}

struct Slot<E> {
    id: ListenerId,
    /// Taken out while the listener's own `update` runs.
    listener: Option<Box<dyn SearchListener<E>>>,
    detached: bool,
}

struct Inner<E> {
    slots: Vec<Slot<E>>,
    /// Listeners attached during a notification; they join the slot
    /// list when the outermost notification unwinds.
    pending: Vec<Slot<E>>,
    next_id: u64,
    notify_depth: u32,
}

/// Owner of an ordered listener collection.
///
/// Re-entrancy rules, applied per notification cycle:
/// - every listener attached before the cycle receives `update`
///   exactly once, in attachment order;
/// - detaching the current or a later listener mid-cycle is safe, the
///   detached listener receives no further updates (a listener that
///   detaches itself is dropped once its `update` returns);
/// - attaching mid-cycle queues the new listener for the *next*
///   cycle.
pub struct Subject<E> {
    inner: RefCell<Inner<E>>,
}

impl<E> Subject<E> {
    /// A subject with no listeners.
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                slots: Vec::new(),
                pending: Vec::new(),
                next_id: 0,
                notify_depth: 0,
            }),
        }
    }

    /// Attaches a listener, returning the id to detach it with.
    #[inline]
    pub fn attach<L>(&self, listener: L) -> ListenerId
    where
        L: SearchListener<E> + 'static,
    {
        self.attach_boxed(Box::new(listener))
    }

    /// Attaches an already boxed listener.
    pub fn attach_boxed(&self, listener: Box<dyn SearchListener<E>>) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        let slot = Slot {
            id,
            listener: Some(listener),
            detached: false,
        };
        if inner.notify_depth > 0 {
            inner.pending.push(slot);
        } else {
            inner.slots.push(slot);
        }
        id
    }

    /// Detaches the listener behind `id`; returns whether it was
    /// attached.
    pub fn detach(&self, id: ListenerId) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let notifying = inner.notify_depth > 0;

        let mut found = false;
        for slot in inner.slots.iter_mut().chain(inner.pending.iter_mut()) {
            if slot.id == id && !slot.detached {
                slot.detached = true;
                found = true;
                break;
            }
        }
        if found && !notifying {
            inner.slots.retain(|s| !s.detached);
            inner.pending.retain(|s| !s.detached);
        }
        found
    }

    /// Number of attached listeners, counting those queued for the
    /// next cycle.
    pub fn len(&self) -> usize {
        let inner = self.inner.borrow();
        inner.slots.iter().filter(|s| !s.detached).count()
            + inner.pending.iter().filter(|s| !s.detached).count()
    }

    /// Whether no listener is attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `update` on every attached listener, in attachment
    /// order.
    pub fn notify(&self, event: &E) {
        let cycle_len = {
            let mut inner = self.inner.borrow_mut();
            inner.notify_depth += 1;
            inner.slots.len()
        };

        for index in 0..cycle_len {
            let taken = {
                let mut inner = self.inner.borrow_mut();
                let slot = &mut inner.slots[index];
                if slot.detached {
                    None
                } else {
                    slot.listener.take()
                }
            };
            if let Some(mut listener) = taken {
                listener.update(self, event);
                let mut inner = self.inner.borrow_mut();
                let slot = &mut inner.slots[index];
                if !slot.detached {
                    slot.listener = Some(listener);
                }
                // A listener detached during its own update is
                // dropped here instead of being restored.
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.notify_depth -= 1;
        if inner.notify_depth == 0 {
            inner.slots.retain(|s| !s.detached);
            let mut pending = std::mem::take(&mut inner.pending);
            pending.retain(|s| !s.detached);
            inner.slots.append(&mut pending);
        }
    }
}

impl<E> Default for Subject<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl SearchListener<u32> for Recorder {
        fn update(&mut self, _subject: &Subject<u32>, _event: &u32) {
            self.log.borrow_mut().push(self.label);
        }

        fn name(&self) -> &str {
            self.label
        }
    }

    #[test]
    fn test_notify_fires_each_listener_once_in_attachment_order() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new();
        subject.attach(Recorder {
            label: "first",
            log: log.clone(),
        });
        subject.attach(Recorder {
            label: "second",
            log: log.clone(),
        });
        assert_eq!(subject.len(), 2);

        subject.notify(&0);
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        subject.notify(&1);
        assert_eq!(*log.borrow(), vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn test_detach_between_cycles_stops_updates() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new();
        let id = subject.attach(Recorder {
            label: "gone",
            log: log.clone(),
        });
        subject.attach(Recorder {
            label: "stays",
            log: log.clone(),
        });

        assert!(subject.detach(id));
        assert!(!subject.detach(id), "double detach reports false");
        assert_eq!(subject.len(), 1);

        subject.notify(&0);
        assert_eq!(*log.borrow(), vec!["stays"]);
    }

    /// Detaches a victim listener the first time it runs.
    struct Saboteur {
        victim: Rc<RefCell<Option<ListenerId>>>,
        log: Log,
    }

    impl SearchListener<u32> for Saboteur {
        fn update(&mut self, subject: &Subject<u32>, _event: &u32) {
            self.log.borrow_mut().push("saboteur");
            if let Some(id) = self.victim.borrow_mut().take() {
                assert!(subject.detach(id));
            }
        }
    }

    #[test]
    fn test_detaching_a_later_listener_mid_notify_skips_it() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<RefCell<Option<ListenerId>>> = Rc::new(RefCell::new(None));

        let subject = Subject::new();
        subject.attach(Saboteur {
            victim: victim.clone(),
            log: log.clone(),
        });
        let victim_id = subject.attach(Recorder {
            label: "victim",
            log: log.clone(),
        });
        *victim.borrow_mut() = Some(victim_id);

        subject.notify(&0);
        // The victim was removed before its turn came.
        assert_eq!(*log.borrow(), vec!["saboteur"]);
        assert_eq!(subject.len(), 1);

        subject.notify(&1);
        assert_eq!(*log.borrow(), vec!["saboteur", "saboteur"]);
    }

    /// Detaches itself on its first update.
    struct OneShot {
        id: Rc<RefCell<Option<ListenerId>>>,
        log: Log,
    }

    impl SearchListener<u32> for OneShot {
        fn update(&mut self, subject: &Subject<u32>, _event: &u32) {
            self.log.borrow_mut().push("one-shot");
            if let Some(id) = self.id.borrow_mut().take() {
                subject.detach(id);
            }
        }
    }

    #[test]
    fn test_listener_may_detach_itself_mid_update() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let own_id: Rc<RefCell<Option<ListenerId>>> = Rc::new(RefCell::new(None));

        let subject = Subject::new();
        let id = subject.attach(OneShot {
            id: own_id.clone(),
            log: log.clone(),
        });
        *own_id.borrow_mut() = Some(id);
        subject.attach(Recorder {
            label: "after",
            log: log.clone(),
        });

        subject.notify(&0);
        assert_eq!(*log.borrow(), vec!["one-shot", "after"]);
        assert_eq!(subject.len(), 1);

        subject.notify(&1);
        assert_eq!(*log.borrow(), vec!["one-shot", "after", "after"]);
    }

    /// Attaches a recorder the first time it runs.
    struct Spawner {
        log: Log,
        spawned: bool,
    }

    impl SearchListener<u32> for Spawner {
        fn update(&mut self, subject: &Subject<u32>, _event: &u32) {
            self.log.borrow_mut().push("spawner");
            if !self.spawned {
                self.spawned = true;
                subject.attach(Recorder {
                    label: "spawned",
                    log: self.log.clone(),
                });
            }
        }
    }

    #[test]
    fn test_attach_mid_notify_joins_the_next_cycle() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new();
        subject.attach(Spawner {
            log: log.clone(),
            spawned: false,
        });

        subject.notify(&0);
        // The spawned listener must not run in the cycle that
        // attached it.
        assert_eq!(*log.borrow(), vec!["spawner"]);
        assert_eq!(subject.len(), 2);

        subject.notify(&1);
        assert_eq!(*log.borrow(), vec!["spawner", "spawner", "spawned"]);
    }

    #[test]
    fn test_counter_listener_counts_cycles() {
        struct Counter {
            hits: Rc<RefCell<u32>>,
        }
        impl SearchListener<u32> for Counter {
            fn update(&mut self, _subject: &Subject<u32>, _event: &u32) {
                *self.hits.borrow_mut() += 1;
            }
        }

        let hits = Rc::new(RefCell::new(0));
        let subject = Subject::new();
        subject.attach(Counter { hits: hits.clone() });

        for event in 0..100 {
            subject.notify(&event);
        }
        assert_eq!(*hits.borrow(), 100);
    }

    #[test]
    fn test_debug_reports_listener_count() {
        let subject: Subject<u32> = Subject::new();
        assert!(format!("{:?}", subject).contains('0'));
        assert!(subject.is_empty());
    }
}
