// Member domain module
// Member entity, the joined search row, and search filters

#![allow(clippy::module_inception)]

pub mod member;
pub mod search_condition;
pub mod sort_key;

pub use member::{Member, MemberTeam};
pub use search_condition::MemberSearchCondition;
pub use sort_key::MemberSortKey;
