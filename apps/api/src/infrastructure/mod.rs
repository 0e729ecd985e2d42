// Infrastructure layer module
// Contains database adapters: query building, repositories, schema setup

pub mod query;
pub mod repositories;
pub mod schema;
