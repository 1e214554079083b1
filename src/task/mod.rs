pub mod collection;
pub mod parser;
pub mod tree;
pub mod types;
pub mod views;


pub use collection::*;
pub use parser::*;
pub use tree::*;
pub use types::*;
pub use views::*;
