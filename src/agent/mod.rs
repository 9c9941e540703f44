pub mod actions;
pub mod assistant;
pub mod persona;
pub mod reply;

pub use actions::*;
pub use assistant::*;
pub use persona::*;
pub use reply::*;
