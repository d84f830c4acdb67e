pub mod category;
pub mod engine_state;
pub mod registry;
pub mod schedule;

pub use category::*;
pub use engine_state::*;
pub use registry::*;
pub use schedule::*;
