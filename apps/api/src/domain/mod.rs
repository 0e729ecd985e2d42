// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod member;
pub mod page;
pub mod repositories;
pub mod team;
