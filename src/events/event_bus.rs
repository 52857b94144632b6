use crate::data_structures::{ObjectPool, Pool};
use crate::events::{Event, EventKind, Sender};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Receives the [events](Event) it subscribed to on an [EventBus].
pub trait EventListener {
	fn notify(&self, sender: Sender, event: &Event);
}

type Listeners = [Vec<Weak<dyn EventListener>>; EventKind::COUNT];

/// A synchronous, typed publish/subscribe dispatcher.
///
/// The bus only keeps weak references to its listeners, so subscribing never keeps
/// a listener alive. Dropped listeners are pruned the next time their event kind is published.
pub struct EventBus {
	listeners: RefCell<Listeners>,
	snapshots: Pool<Vec<Rc<dyn EventListener>>>,
	depth: Cell<usize>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::with_snapshot_prefill(0)
	}

	/// Creates a bus with `prefill` dispatch buffers allocated up front.
	/// Nested publishes each take one buffer.
	pub fn with_snapshot_prefill(prefill: usize) -> Self {
		Self {
			listeners: RefCell::new(Listeners::default()),
			snapshots: Pool::with_factory(Vec::new, prefill),
			depth: Cell::new(0),
		}
	}

	/// Subscribes `listener` to every event of `kind`.
	/// Returns *false* if it was already subscribed to that kind.
	pub fn subscribe<L: EventListener + 'static>(&self, listener: &Rc<L>, kind: EventKind) -> bool {
		let weak: Weak<L> = Rc::downgrade(listener);
		self.subscribe_weak(weak, kind)
	}

	/// Subscribes an already downgraded listener to every event of `kind`.
	pub fn subscribe_weak(&self, listener: Weak<dyn EventListener>, kind: EventKind) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		let list = &mut listeners[kind.index()];

		let address = listener.as_ptr() as *const ();
		if list.iter().any(|l| l.as_ptr() as *const () == address) {
			return false;
		}

		list.push(listener);
		true
	}

	/// Removes the subscription of `listener` to `kind`.
	/// Returns *false* if it wasn't subscribed.
	pub fn unsubscribe<L: EventListener + 'static>(&self, listener: &Rc<L>, kind: EventKind) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		let list = &mut listeners[kind.index()];

		let address = Rc::as_ptr(listener) as *const ();
		let before = list.len();
		list.retain(|l| l.as_ptr() as *const () != address);
		before != list.len()
	}

	/// Drops every subscription.
	pub fn clear(&self) {
		self.listeners.borrow_mut().iter_mut().for_each(Vec::clear);
	}

	/// Number of live listeners subscribed to `kind`.
	pub fn listener_count(&self, kind: EventKind) -> usize {
		self.listeners.borrow()[kind.index()].iter().filter(|l| l.strong_count() > 0).count()
	}

	/// Whether a publish is currently being dispatched.
	pub fn is_dispatching(&self) -> bool {
		self.depth.get() > 0
	}

	/// Synchronously notifies every listener subscribed to the kind of `event`, in subscription order.
	///
	/// The listener list is copied before dispatching, so listeners may publish, subscribe
	/// or unsubscribe from within [notify](EventListener::notify). Listeners subscribed during
	/// a dispatch only receive subsequent events.
	pub fn publish(&self, sender: Sender, event: &Event) {
		let kind = event.kind();
		let mut snapshot = self.snapshots.take_one();

		let mut stale = false;
		for listener in self.listeners.borrow()[kind.index()].iter() {
			match listener.upgrade() {
				Some(listener) => snapshot.push(listener),
				None => stale = true,
			}
		}

		if stale {
			self.listeners.borrow_mut()[kind.index()].retain(|l| l.strong_count() > 0);
		}

		let depth = self.depth.get();
		tracing::trace!(%sender, ?kind, entity = ?event.entity(), listeners = snapshot.len(), depth, "publish");

		self.depth.set(depth + 1);
		for listener in snapshot.iter() {
			listener.notify(sender, event);
		}
		self.depth.set(depth);
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let listeners = self.listeners.borrow();
		f.debug_struct("EventBus")
			.field("listeners", &listeners.iter().map(Vec::len).collect::<Vec<_>>())
			.field("depth", &self.depth.get())
			.finish()
	}
}
