use std::collections::{HashMap, HashSet, VecDeque};
use std::ops::{Deref, DerefMut};
use std::hash::{BuildHasher, Hash};
use std::mem::ManuallyDrop;
use std::cell::RefCell;
use std::rc::Rc;

/// Brings a pooled instance back to a neutral state before it is handed out again.
pub trait Reset {
	fn reset(&mut self);
}

/// A store of reusable instances.
///
/// Pools don't track checked-out instances:
/// callers must not keep using an instance after [releasing](ObjectPool::release) it.
pub trait ObjectPool<T> {
	/// Returns an idle instance, or builds a new one if none is available.
	fn get(&self) -> T;

	/// Resets the instance and makes it available again.
	fn release(&self, value: T);

	/// Number of idle instances.
	fn available(&self) -> usize;
}

struct PoolInner<T> {
	values: RefCell<Vec<T>>,
	factory: Box<dyn Fn() -> T>,
}

/// A single-threaded, unsynchronized [ObjectPool].
///
/// Cloning a [Pool] yields another handle onto the same instances.
pub struct Pool<T> {
	inner: Rc<PoolInner<T>>,
}

impl<T: Reset + 'static> Pool<T> {
	pub fn new() -> Self
	where
		T: Default,
	{
		Self::with_factory(T::default, 0)
	}

	/// Creates a pool building its instances with `factory`, eagerly filled with `prefill` of them.
	pub fn with_factory(factory: impl Fn() -> T + 'static, prefill: usize) -> Self {
		let values = (0..prefill).map(|_| factory()).collect();
		Self {
			inner: Rc::new(PoolInner {
				values: RefCell::new(values),
				factory: Box::new(factory),
			}),
		}
	}

	/// Takes an instance that goes back to the pool when the borrow is dropped.
	pub fn take_one(&self) -> PoolBorrow<T, Self> {
		PoolBorrow::new(self.get(), self.clone())
	}
}

impl<T: Reset> ObjectPool<T> for Pool<T> {
	fn get(&self) -> T {
		let value = self.inner.values.borrow_mut().pop();
		value.unwrap_or_else(|| (self.inner.factory)())
	}

	fn release(&self, mut value: T) {
		value.reset();
		self.inner.values.borrow_mut().push(value);
	}

	fn available(&self) -> usize {
		self.inner.values.borrow().len()
	}
}

impl<T> Clone for Pool<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: Reset + Default + 'static> Default for Pool<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// An instance taken from an [ObjectPool], released back into it on drop.
pub struct PoolBorrow<T, P: ObjectPool<T>> {
	value: ManuallyDrop<T>,
	pool: P,
}

impl<T, P: ObjectPool<T>> PoolBorrow<T, P> {
	pub(crate) fn new(value: T, pool: P) -> Self {
		Self {
			value: ManuallyDrop::new(value),
			pool,
		}
	}
}

impl<T, P: ObjectPool<T>> Deref for PoolBorrow<T, P> {
	type Target = T;
	fn deref(&self) -> &Self::Target {
		&self.value
	}
}

impl<T, P: ObjectPool<T>> DerefMut for PoolBorrow<T, P> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.value
	}
}

impl<T, P: ObjectPool<T>> Drop for PoolBorrow<T, P> {
	fn drop(&mut self) {
		// SAFETY: `value` is never touched again after this point.
		let value = unsafe { ManuallyDrop::take(&mut self.value) };
		self.pool.release(value);
	}
}

impl<T> Reset for Vec<T> {
	fn reset(&mut self) {
		self.clear()
	}
}

impl<T> Reset for VecDeque<T> {
	fn reset(&mut self) {
		self.clear()
	}
}

impl<K: Eq + Hash, S: BuildHasher> Reset for HashSet<K, S> {
	fn reset(&mut self) {
		self.clear()
	}
}

impl<K: Eq + Hash, V, S: BuildHasher> Reset for HashMap<K, V, S> {
	fn reset(&mut self) {
		self.clear()
	}
}

impl Reset for String {
	fn reset(&mut self) {
		self.clear()
	}
}

impl<T> Reset for Option<T> {
	fn reset(&mut self) {
		*self = None
	}
}
