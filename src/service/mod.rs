//! Read-side relation resolution and write-side request validation.

mod resolver;
mod validation;
pub use resolver::RelationResolver;
pub use validation::RequestValidator;
