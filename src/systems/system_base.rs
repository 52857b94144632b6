use crate::events::{Event, EventKind, EventListener, Sender};
use crate::data_structures::{Pool, PoolBorrow};
use crate::entities::{Entity, EntityManager};
use crate::systems::Validator;
use nohash_hasher::IntMap;
use tracing::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

const WATCHED_KINDS: [EventKind; 4] = [
	EventKind::ComponentAdded,
	EventKind::ComponentsRemoved,
	EventKind::EntityCreated,
	EventKind::EntityRemoved,
];

/// A snapshot of a watched set, returned to its pool when dropped.
pub type WatchedSnapshot = PoolBorrow<Vec<Entity>, Pool<Vec<Entity>>>;

/// Insertion-ordered set with O(1) insert and remove.
/// Removal swaps the last entity into the freed position.
#[derive(Default)]
struct WatchedEntities {
	order: Vec<Entity>,
	index: IntMap<Entity, usize>,
}

impl WatchedEntities {
	fn insert(&mut self, entity: Entity) -> bool {
		if self.index.contains_key(&entity) {
			return false;
		}

		self.index.insert(entity, self.order.len());
		self.order.push(entity);
		true
	}

	fn remove(&mut self, entity: Entity) -> bool {
		let position = match self.index.remove(&entity) {
			None => return false,
			Some(position) => position,
		};

		self.order.swap_remove(position);
		if let Some(moved) = self.order.get(position) {
			self.index.insert(*moved, position);
		}

		true
	}
}

/// The shared half of every system: a set of [validators](Validator) and the
/// set of entities currently passing all of them.
///
/// The watched set is kept up to date by the structural events published on the
/// [EntityManager]'s bus. It is only computed from scratch once, when the system is built.
/// Concrete [systems](crate::systems::System) own an `Rc<SystemBase>` and iterate
/// [watched_entities](SystemBase::watched_entities) during their update.
pub struct SystemBase {
	name: &'static str,
	entities: Rc<EntityManager>,
	validators: Vec<Box<dyn Validator>>,
	watched: RefCell<WatchedEntities>,
	snapshots: Pool<Vec<Entity>>,
}

impl SystemBase {
	pub fn builder(name: &'static str) -> SystemBuilder {
		SystemBuilder {
			name,
			validators: Vec::new(),
		}
	}

	/// Creates the base of a system, subscribes it to the structural events and scans
	/// every active entity once.
	pub fn new(name: &'static str, entities: &Rc<EntityManager>, validators: Vec<Box<dyn Validator>>) -> Rc<Self> {
		let buffers = entities.config().watched_snapshot_buffers;
		let base = Rc::new(Self {
			name,
			entities: entities.clone(),
			validators,
			watched: RefCell::new(WatchedEntities::default()),
			snapshots: Pool::with_factory(Vec::new, buffers),
		});

		for kind in WATCHED_KINDS {
			entities.bus().subscribe(&base, kind);
		}

		for entity in entities.entities() {
			base.refresh(entity);
		}

		debug!(system = name, validators = base.validators.len(), watched = base.watched_count(), "system created");
		base
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn entities(&self) -> &Rc<EntityManager> {
		&self.entities
	}

	/// Whether `entity` is active and passes every validator.
	/// A system without validators accepts every active entity.
	pub fn is_valid(&self, entity: Entity) -> bool {
		self.entities.entity_exists(entity) && self.validators.iter().all(|v| v.is_valid(entity, &self.entities))
	}

	pub fn is_watching(&self, entity: Entity) -> bool {
		self.watched.borrow().index.contains_key(&entity)
	}

	pub fn watched_count(&self) -> usize {
		self.watched.borrow().order.len()
	}

	/// Copies the watched set, in insertion order.
	///
	/// Working on a copy keeps iteration sound while the update itself creates or
	/// removes entities and components.
	pub fn watched_entities(&self) -> WatchedSnapshot {
		let mut snapshot = self.snapshots.take_one();
		snapshot.extend_from_slice(&self.watched.borrow().order);
		snapshot
	}

	/// Re-evaluates `entity` against the validators and updates the watched set.
	/// Returns whether the entity is watched afterwards.
	pub fn refresh(&self, entity: Entity) -> bool {
		let valid = self.is_valid(entity);
		let mut watched = self.watched.borrow_mut();

		if valid && watched.insert(entity) {
			trace!(system = self.name, %entity, "watching entity");
		} else if !valid && watched.remove(entity) {
			trace!(system = self.name, %entity, "stopped watching entity");
		}

		valid
	}

	fn unwatch(&self, entity: Entity) {
		if self.watched.borrow_mut().remove(entity) {
			trace!(system = self.name, %entity, "stopped watching removed entity");
		}
	}
}

impl EventListener for SystemBase {
	fn notify(&self, _sender: Sender, event: &Event) {
		match event {
			Event::EntityCreated(entity) | Event::ComponentAdded(entity) | Event::ComponentsRemoved(entity) => {
				self.refresh(*entity);
			},
			Event::EntityRemoved(entity) => self.unwatch(*entity),
			Event::EntityCreationRequested(_)
			| Event::EntityRemovalRequested(_)
			| Event::ComponentRemovalRequested { .. } => {},
		}
	}
}

/// Collects the validators of a [SystemBase] before building it.
pub struct SystemBuilder {
	name: &'static str,
	validators: Vec<Box<dyn Validator>>,
}

impl SystemBuilder {
	pub fn validator<V: 'static + Validator>(mut self, validator: V) -> Self {
		self.validators.push(Box::new(validator));
		self
	}

	pub fn build(self, entities: &Rc<EntityManager>) -> Rc<SystemBase> {
		SystemBase::new(self.name, entities, self.validators)
	}
}
