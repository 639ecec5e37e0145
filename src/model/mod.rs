pub mod types;
pub mod entities;
pub mod validator;

pub use types::*;
pub use entities::*;
pub use validator::*;
