//! [Components](Component) are the pieces of data attached to [entities](crate::entities::Entity).
//!
//! Every component type is identified at runtime by a [ComponentId],
//! generated on first use by #\[derive([`Component`](courier_ecs_derive::Component))].
//! Once attached, a component is owned by the [EntityManager](crate::entities::EntityManager);
//! queries hand out [AnyComponent] or [ComponentRef] views onto the stored instance.

pub mod component_id;
mod any_component;
mod component_set;
mod component_type;

pub use any_component::*;
pub use component_set::*;
pub use component_type::*;
pub use component_id::ComponentId;
pub use courier_ecs_derive::Component;
