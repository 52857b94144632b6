use crate::systems::{System, SystemError, SystemStore, Tick};
use crate::entities::EntityManager;
use crate::config::EcsConfig;
use crate::events::EventBus;
use std::ops::Deref;
use std::rc::Rc;

/// A container for [entities](crate::entities::Entity) and systems.
///
/// The context builds the [EventBus] and the [EntityManager] once and hands out shared
/// handles to them, so systems and collaborators receive their dependencies explicitly.
pub struct EcsContext {
	bus: Rc<EventBus>,
	entities: Rc<EntityManager>,
	system_store: SystemStore,
}

impl EcsContext {
	pub fn new() -> Self {
		Self::with_config(EcsConfig::default())
	}

	pub fn with_config(config: EcsConfig) -> Self {
		let bus = Rc::new(EventBus::with_snapshot_prefill(config.dispatch_buffers));
		let entities = EntityManager::new(bus.clone(), config);
		Self {
			bus,
			entities,
			system_store: SystemStore::new(),
		}
	}

	pub fn bus(&self) -> &Rc<EventBus> {
		&self.bus
	}

	pub fn entity_manager(&self) -> &Rc<EntityManager> {
		&self.entities
	}

	/// Number of registered [systems](System).
	pub fn system_count(&self) -> usize {
		self.system_store.len()
	}

	/// Add a new [system](System) to the [EcsContext].
	/// Each system type can only be registered once, and only before [setup_systems](Self::setup_systems).
	pub fn register_system<T: 'static + System>(&mut self, system: T) -> Result<(), SystemError> {
		self.system_store.add_system(system)
	}

	/// Initialize all [systems](System).
	/// Must be called before any system can be run.
	pub fn setup_systems(&mut self) -> Result<(), SystemError> {
		self.system_store.setup_systems()
	}

	/// Execute all [systems](System) in registration order.
	pub fn run_systems(&mut self, tick: &Tick) -> Result<(), SystemError> {
		self.system_store.run_systems(tick)
	}
}

impl Default for EcsContext {
	fn default() -> Self {
		Self::new()
	}
}

impl Deref for EcsContext {
	type Target = EntityManager;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entities
	}
}
