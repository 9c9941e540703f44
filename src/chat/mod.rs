pub mod dispatcher;
pub mod interface;
pub mod parser;
pub mod types;

pub use dispatcher::*;
pub use interface::*;
pub use parser::*;
pub use types::*;
