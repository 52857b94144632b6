use crate::systems::{System, SystemError, Tick};
use std::collections::HashSet;
use std::any::TypeId;
use tracing::debug;

pub(crate) struct SystemStore {
	state: State,
	set: HashSet<TypeId>,
	systems: Vec<Box<dyn System>>,
}

#[derive(Default)]
enum State {
	#[default]
	Uninitialized,
	Initialized,
}

impl SystemStore {
	pub fn new() -> Self {
		Self {
			set: HashSet::default(),
			state: State::default(),
			systems: Vec::default(),
		}
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn add_system<T: 'static + System>(&mut self, system: T) -> Result<(), SystemError> {
		let name = std::any::type_name::<T>();
		match self.state {
			State::Uninitialized => {
				if !self.set.insert(TypeId::of::<T>()) {
					return Err(SystemError::AlreadyRegistered(name));
				}

				debug!(system = name, "system registered");
				self.systems.push(Box::new(system));
				Ok(())
			},
			State::Initialized => Err(SystemError::RegisteredAfterSetup(name)),
		}
	}

	pub fn setup_systems(&mut self) -> Result<(), SystemError> {
		match self.state {
			State::Uninitialized => {
				self.systems.iter_mut().for_each(|s| s.setup());
				self.state = State::Initialized;
				debug!(systems = self.systems.len(), "systems initialized");
				Ok(())
			},
			State::Initialized => Err(SystemError::AlreadyInitialized),
		}
	}

	pub fn run_systems(&mut self, tick: &Tick) -> Result<(), SystemError> {
		match self.state {
			State::Uninitialized => Err(SystemError::NotInitialized),
			State::Initialized => {
				self.systems.iter_mut().for_each(|s| s.update(tick));
				Ok(())
			},
		}
	}
}
