use crate::data_structures::{ObjectPool, PoolBorrow, Reset};
use parking_lot::Mutex;
use std::sync::Arc;

struct ConcurrentPoolInner<T> {
	values: Mutex<Vec<T>>,
	factory: Box<dyn Fn() -> T + Send + Sync>,
}

/// A thread-safe [ObjectPool].
///
/// `get` and `release` are serialized by a lock, so the pool can be shared between
/// the update loop and independent worker threads. Cloning yields another handle onto the same instances.
pub struct ConcurrentPool<T> {
	inner: Arc<ConcurrentPoolInner<T>>,
}

impl<T: Reset + Send + 'static> ConcurrentPool<T> {
	pub fn new() -> Self
	where
		T: Default,
	{
		Self::with_factory(T::default, 0)
	}

	/// Creates a pool building its instances with `factory`, eagerly filled with `prefill` of them.
	pub fn with_factory(factory: impl Fn() -> T + Send + Sync + 'static, prefill: usize) -> Self {
		let values = (0..prefill).map(|_| factory()).collect();
		Self {
			inner: Arc::new(ConcurrentPoolInner {
				values: Mutex::new(values),
				factory: Box::new(factory),
			}),
		}
	}

	/// Takes an instance that goes back to the pool when the borrow is dropped.
	pub fn take_one(&self) -> PoolBorrow<T, Self> {
		PoolBorrow::new(self.get(), self.clone())
	}
}

impl<T: Reset + Send> ObjectPool<T> for ConcurrentPool<T> {
	fn get(&self) -> T {
		let value = self.inner.values.lock().pop();
		value.unwrap_or_else(|| (self.inner.factory)())
	}

	fn release(&self, mut value: T) {
		value.reset();
		self.inner.values.lock().push(value);
	}

	fn available(&self) -> usize {
		self.inner.values.lock().len()
	}
}

impl<T> Clone for ConcurrentPool<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: Reset + Send + Default + 'static> Default for ConcurrentPool<T> {
	fn default() -> Self {
		Self::new()
	}
}
