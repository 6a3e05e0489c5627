//! Column types shared by the entities.

mod match_status;
mod role;

pub use match_status::*;
pub use role::*;
