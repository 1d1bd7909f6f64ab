//! A minimal observable value cell shared between a widget and the rest of the app.
//!
//! Clones share the same value. `set` and `update` notify subscribers after the write.
//! The cell is `Rc`-based and therefore confined to one thread.
//!
//! Writes may come from anywhere, including a subscriber or a `with` reader of the same cell.
//! A write that arrives while the value is borrowed is queued and applied, with its own
//! notification, once the borrow ends. A subscriber that writes on every notification
//! therefore never settles.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener<T>)>,
}

enum Write<T> {
    Set(T),
    Update(Box<dyn FnOnce(&mut T)>),
}

impl<T> Write<T> {
    fn apply(self, value: &mut T) {
        match self {
            Write::Set(v) => *value = v,
            Write::Update(f) => f(value),
        }
    }
}

struct Shared<T> {
    value: RefCell<T>,
    listeners: RefCell<Listeners<T>>,
    pending: RefCell<VecDeque<Write<T>>>,
    notifying: Cell<bool>,
}

pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Observable");
        match self.shared.value.try_borrow() {
            Ok(v) => s.field("value", &*v),
            Err(_) => s.field("value", &"<being written>"),
        };
        s.field("subscribers", &self.shared.listeners.borrow().entries.len())
            .field("pending", &self.shared.pending.borrow().len())
            .finish()
    }
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                listeners: RefCell::new(Listeners {
                    next_id: 0,
                    entries: Vec::new(),
                }),
                pending: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
            }),
        }
    }

    /// Clones the current value.
    ///
    /// Must not be called from inside an `update`/`try_update` closure on the same cell; that
    /// closure already holds the value mutably.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.shared.value.borrow().clone()
    }

    /// Reads the value without cloning it. Writes made by `f` are applied after it returns.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let out = f(&self.shared.value.borrow());
        self.flush();
        out
    }

    /// Replaces the value. Deferred while the value is borrowed.
    pub fn set(&self, value: T) {
        self.enqueue(Write::Set(value));
    }

    /// Mutates the value in place, then notifies subscribers. Deferred while the value is
    /// borrowed.
    pub fn update(&self, f: impl FnOnce(&mut T) + 'static) {
        self.enqueue(Write::Update(Box::new(f)));
    }

    /// Mutates the value now and returns `f`'s result, or returns `None` without calling `f`
    /// if the value is currently borrowed.
    pub fn try_update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let out = {
            let mut value = self.shared.value.try_borrow_mut().ok()?;
            f(&mut value)
        };
        self.notify();
        self.flush();
        Some(out)
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let mut listeners = self.shared.listeners.borrow_mut();
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(i, _)| *i != id);
        listeners.entries.len() != before
    }

    fn enqueue(&self, write: Write<T>) {
        self.shared.pending.borrow_mut().push_back(write);
        self.flush();
    }

    /// Applies queued writes one at a time, notifying after each.
    ///
    /// A no-op while subscribers are running or the value is borrowed; whoever holds the
    /// borrow flushes when it ends.
    fn flush(&self) {
        if self.shared.notifying.get() {
            return;
        }
        loop {
            let Ok(mut value) = self.shared.value.try_borrow_mut() else {
                return;
            };
            let Some(write) = self.shared.pending.borrow_mut().pop_front() else {
                return;
            };
            write.apply(&mut value);
            drop(value);
            self.notify();
        }
    }

    fn notify(&self) {
        // Snapshot so listeners may subscribe or unsubscribe while being called.
        let snapshot: Vec<Listener<T>> = self
            .shared
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        if snapshot.is_empty() {
            return;
        }
        self.shared.notifying.set(true);
        {
            let value = self.shared.value.borrow();
            for listener in snapshot {
                listener(&value);
            }
        }
        self.shared.notifying.set(false);
    }
}
