use std::collections::VecDeque;
use std::fmt;

/// A unique handle to an entity.
///
/// An [Entity] is nothing but an id; it joins together the [components](crate::components::Component)
/// attached to it.
#[derive(Default, Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity(u32);

impl nohash_hasher::IsEnabled for Entity {}

impl Entity {
	#[inline(always)]
	pub const fn from_raw(index: u32) -> Self {
		Self(index)
	}

	#[inline(always)]
	pub const fn index(self) -> u32 {
		self.0
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({})", self.0)
	}
}

/// Hands out entity ids: freed ids first, in the order they were freed, then fresh ones.
#[derive(Default, Debug)]
pub struct EntityAllocator {
	next: u32,
	recycled: VecDeque<Entity>,
}

impl EntityAllocator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Pops the oldest freed id, or issues the next never-used one.
	pub fn allocate(&mut self) -> Entity {
		if let Some(entity) = self.recycled.pop_front() {
			return entity;
		}

		debug_assert!(self.next < u32::MAX, "Entity id space exhausted");
		let entity = Entity(self.next);
		self.next += 1;
		entity
	}

	/// Queues an id for reuse. Ids must never be freed twice.
	pub fn free(&mut self, entity: Entity) {
		debug_assert!(entity.0 < self.next, "Freed an id that was never issued");
		self.recycled.push_back(entity);
	}

	/// Number of ids waiting to be reused.
	pub fn recycled(&self) -> usize {
		self.recycled.len()
	}

	/// Number of distinct ids issued so far.
	pub fn issued(&self) -> u32 {
		self.next
	}
}
