//! Construction-time tuning of an [EcsContext](crate::prelude::EcsContext).

/// Capacity hints for the registry and dispatch buffers.
///
/// None of these values limit anything; they only decide how much is allocated up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcsConfig {
	/// Expected number of simultaneously active entities.
	pub entity_capacity: usize,
	/// Expected number of entities carrying at least one component.
	pub component_capacity: usize,
	/// Dispatch buffers allocated by the [EventBus](crate::events::EventBus) up front.
	/// Every nested publish uses one.
	pub dispatch_buffers: usize,
	/// Snapshot buffers each [SystemBase](crate::systems::SystemBase) allocates up front.
	pub watched_snapshot_buffers: usize,
}

impl EcsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
		self.entity_capacity = capacity;
		self
	}

	pub fn with_component_capacity(mut self, capacity: usize) -> Self {
		self.component_capacity = capacity;
		self
	}

	pub fn with_dispatch_buffers(mut self, count: usize) -> Self {
		self.dispatch_buffers = count;
		self
	}

	pub fn with_watched_snapshot_buffers(mut self, count: usize) -> Self {
		self.watched_snapshot_buffers = count;
		self
	}
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			entity_capacity: 256,
			component_capacity: 256,
			dispatch_buffers: 4,
			watched_snapshot_buffers: 1,
		}
	}
}
