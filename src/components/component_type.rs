use crate::components::ComponentId;
use std::hash::{Hash, Hasher};
use crate::entities::Entity;

/// This trait should only be implemented by #\[derive([`Component`](courier_ecs_derive::Component))].
/// It carries the per-type metadata the [EntityManager](crate::entities::EntityManager) needs
/// to store and look up components of that type.
pub trait ComponentTypeInfo: 'static {
	/// Whether an entity may hold more than one instance of this type.
	const ALLOW_MULTIPLE: bool = false;

	/// Update-ordering priority. Consumers iterating components in a defined order visit lower values first.
	const PRIORITY: i32 = 0;

	fn component_id() -> ComponentId;
}

/// A unit of data attached to an [entity](Entity).
///
/// Both hooks run outside of any registry borrow, but they only get access to the component itself.
pub trait Component: ComponentTypeInfo {
	/// Called right after the component was bound to `entity`.
	fn on_attach(&mut self, _entity: Entity) {}

	/// Called right after the component was removed from `entity`, before it is dropped.
	fn on_detach(&mut self, _entity: Entity) {}
}

/// A runtime representation of a type implementing the [`Component`] trait.
#[derive(Copy, Clone, Debug)]
pub struct ComponentType {
	id: ComponentId,
	priority: i32,
	allow_multiple: bool,
}

impl ComponentType {
	/// Returns the [`ComponentType`] of T.
	pub fn of<T: ComponentTypeInfo>() -> Self {
		Self {
			id: T::component_id(),
			priority: T::PRIORITY,
			allow_multiple: T::ALLOW_MULTIPLE,
		}
	}

	pub const fn id(&self) -> ComponentId {
		self.id
	}

	pub const fn priority(&self) -> i32 {
		self.priority
	}

	pub const fn allow_multiple(&self) -> bool {
		self.allow_multiple
	}

	pub fn name(&self) -> &'static str {
		self.id.name()
	}
}

impl Eq for ComponentType {}

impl PartialEq<Self> for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Hash for ComponentType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}
