//! Support containers used by the rest of the crate.

mod pool;
mod concurrent_pool;

pub use pool::*;
pub use concurrent_pool::*;
