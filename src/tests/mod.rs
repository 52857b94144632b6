mod system_tests;
mod event_bus_tests;

use crate::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
#[component(allow_multiple)]
pub struct Tag(pub &'static str);

#[derive(Component, Debug, Default)]
#[component(priority = 50)]
pub struct Physics {
	pub mass: f32,
}

#[derive(Component, Debug, Default)]
#[component(priority = "-10")]
pub struct Input;

#[derive(Component)]
#[component(hooks)]
pub struct Tracked {
	pub log: Rc<RefCell<Vec<String>>>,
}

impl Component for Tracked {
	fn on_attach(&mut self, entity: Entity) {
		self.log.borrow_mut().push(format!("attach {}", entity.index()));
	}

	fn on_detach(&mut self, entity: Entity) {
		self.log.borrow_mut().push(format!("detach {}", entity.index()));
	}
}

/// Records every event it is notified of.
#[derive(Default)]
pub struct Recorder {
	events: RefCell<Vec<(EventKind, Option<Entity>)>>,
}

impl Recorder {
	pub fn attach(bus: &EventBus, kinds: &[EventKind]) -> Rc<Self> {
		let recorder = Rc::new(Self::default());
		for kind in kinds {
			bus.subscribe(&recorder, *kind);
		}
		recorder
	}

	pub fn events(&self) -> Vec<(EventKind, Option<Entity>)> {
		self.events.borrow().clone()
	}

	pub fn count(&self, kind: EventKind) -> usize {
		self.events.borrow().iter().filter(|(k, _)| *k == kind).count()
	}

	pub fn clear(&self) {
		self.events.borrow_mut().clear();
	}
}

impl EventListener for Recorder {
	fn notify(&self, _sender: Sender, event: &Event) {
		self.events.borrow_mut().push((event.kind(), event.entity()));
	}
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

pub fn context() -> EcsContext {
	init_tracing();
	EcsContext::new()
}
