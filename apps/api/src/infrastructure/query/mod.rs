// Typed SQL building for member searches
// Predicates, the SELECT builder, and paged execution helpers

pub mod predicates;
pub mod select;
pub mod support;

pub use predicates::{Column, Predicate, Value};
pub use select::{MemberQuery, Projection};
pub use support::QuerySupport;
