//! Structural changes are broadcast as [events](Event) on an [EventBus].
//!
//! Systems learn about new and removed entities and components by subscribing,
//! and any collaborator can ask for structural changes by publishing a request event
//! instead of holding on to the [EntityManager](crate::entities::EntityManager).

mod event;
mod event_bus;

pub use event::*;
pub use event_bus::*;
