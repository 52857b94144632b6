use crate::entities::{Entity, EntityBundle};
use crate::components::ComponentId;
use std::fmt;

/// Something that happened to, or is requested from, the [EntityManager](crate::entities::EntityManager).
#[derive(Clone, Debug)]
pub enum Event {
	/// An entity became active.
	EntityCreated(Entity),
	/// An entity was removed. Its components were detached beforehand.
	EntityRemoved(Entity),
	/// One or more components were attached to the entity.
	ComponentAdded(Entity),
	/// One or more components were detached from the entity.
	ComponentsRemoved(Entity),
	/// Asks the registry to create an entity carrying the bundled components.
	EntityCreationRequested(EntityBundle),
	/// Asks the registry to remove an entity.
	EntityRemovalRequested(Entity),
	/// Asks the registry to remove every component of a kind from an entity.
	ComponentRemovalRequested { entity: Entity, component: ComponentId },
}

impl Event {
	pub fn kind(&self) -> EventKind {
		match self {
			Event::EntityCreated(_) => EventKind::EntityCreated,
			Event::EntityRemoved(_) => EventKind::EntityRemoved,
			Event::ComponentAdded(_) => EventKind::ComponentAdded,
			Event::ComponentsRemoved(_) => EventKind::ComponentsRemoved,
			Event::EntityCreationRequested(_) => EventKind::EntityCreationRequested,
			Event::EntityRemovalRequested(_) => EventKind::EntityRemovalRequested,
			Event::ComponentRemovalRequested { .. } => EventKind::ComponentRemovalRequested,
		}
	}

	/// The entity the event is about. Creation requests don't have one yet.
	pub fn entity(&self) -> Option<Entity> {
		match self {
			Event::EntityCreated(entity)
			| Event::EntityRemoved(entity)
			| Event::ComponentAdded(entity)
			| Event::ComponentsRemoved(entity)
			| Event::EntityRemovalRequested(entity)
			| Event::ComponentRemovalRequested { entity, .. } => Some(*entity),
			Event::EntityCreationRequested(_) => None,
		}
	}
}

/// The tag of an [Event], used as the subscription key.
#[repr(usize)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum EventKind {
	EntityCreated = 0,
	EntityRemoved = 1,
	ComponentAdded = 2,
	ComponentsRemoved = 3,
	EntityCreationRequested = 4,
	EntityRemovalRequested = 5,
	ComponentRemovalRequested = 6,
}

impl EventKind {
	pub const COUNT: usize = 7;

	pub const ALL: [EventKind; EventKind::COUNT] = [
		EventKind::EntityCreated,
		EventKind::EntityRemoved,
		EventKind::ComponentAdded,
		EventKind::ComponentsRemoved,
		EventKind::EntityCreationRequested,
		EventKind::EntityRemovalRequested,
		EventKind::ComponentRemovalRequested,
	];

	#[inline(always)]
	pub const fn index(self) -> usize {
		self as usize
	}
}

/// Names whoever published an event.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Sender(pub &'static str);

impl Sender {
	pub const REGISTRY: Sender = Sender("entity_manager");
}

impl fmt::Display for Sender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}
