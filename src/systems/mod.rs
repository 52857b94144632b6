//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A system keeps track of the entities it cares about through a [SystemBase]:
//! the base listens to structural events and re-checks the affected entity against its [validators](Validator).
//! A [System] must be manually added to an [EcsContext](crate::prelude::EcsContext)
//! for it to become active during the execution of the program.

mod error;
mod system;
mod validator;
mod system_base;
mod system_store;

pub use error::*;
pub use system::*;
pub use validator::*;
pub use system_base::*;
pub(crate) use system_store::*;
