//! Optional WHERE-clause predicates for member searches
//!
//! Each helper returns `None` when its filter is unset, so a search can pass
//! every helper's result to [`MemberQuery::where_all`] and unset filters simply
//! drop out of the WHERE clause.
//!
//! [`MemberQuery::where_all`]: super::select::MemberQuery::where_all

use sqlx::{Postgres, QueryBuilder};

use crate::domain::member::MemberSearchCondition;

/// Columns a member query can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    MemberId,
    MemberUsername,
    MemberAge,
    TeamName,
}

impl Column {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Column::MemberId => "m.id",
            Column::MemberUsername => "m.username",
            Column::MemberAge => "m.age",
            Column::TeamName => "t.name",
        }
    }

    /// Whether the column lives on the joined `teams` table
    pub fn is_team_column(&self) -> bool {
        matches!(self, Column::TeamName)
    }
}

/// Bound parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i32),
}

impl Value {
    fn push_bind(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Value::Text(v) => builder.push_bind(v.clone()),
            Value::Int(v) => builder.push_bind(*v),
        };
    }
}

/// Boolean expression over member/team columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(Column, Value),
    Goe(Column, Value),
    Loe(Column, Value),
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Whether evaluating this predicate needs the `teams` join
    pub fn requires_team_join(&self) -> bool {
        match self {
            Predicate::Eq(c, _) | Predicate::Goe(c, _) | Predicate::Loe(c, _) => {
                c.is_team_column()
            }
            Predicate::And(l, r) => l.requires_team_join() || r.requires_team_join(),
        }
    }

    /// Renders the predicate, binding every value as a parameter
    pub fn push_to(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Predicate::Eq(column, value) => {
                builder.push(column.as_sql()).push(" = ");
                value.push_bind(builder);
            }
            Predicate::Goe(column, value) => {
                builder.push(column.as_sql()).push(" >= ");
                value.push_bind(builder);
            }
            Predicate::Loe(column, value) => {
                builder.push(column.as_sql()).push(" <= ");
                value.push_bind(builder);
            }
            Predicate::And(left, right) => {
                builder.push("(");
                left.push_to(builder);
                builder.push(" AND ");
                right.push_to(builder);
                builder.push(")");
            }
        }
    }
}

pub fn username_eq(username: Option<&str>) -> Option<Predicate> {
    username
        .filter(|u| !u.trim().is_empty())
        .map(|u| Predicate::Eq(Column::MemberUsername, Value::Text(u.to_string())))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Predicate> {
    team_name
        .filter(|t| !t.trim().is_empty())
        .map(|t| Predicate::Eq(Column::TeamName, Value::Text(t.to_string())))
}

pub fn age_goe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::Goe(Column::MemberAge, Value::Int(a)))
}

pub fn age_loe(age: Option<i32>) -> Option<Predicate> {
    age.map(|a| Predicate::Loe(Column::MemberAge, Value::Int(a)))
}

/// Both age bounds at once; `None` unless both are set
pub fn age_between(age_loe_bound: Option<i32>, age_goe_bound: Option<i32>) -> Option<Predicate> {
    match (age_loe(age_loe_bound), age_goe(age_goe_bound)) {
        (Some(loe), Some(goe)) => Some(loe.and(goe)),
        _ => None,
    }
}

/// The standard search predicates for a condition, in a fixed order
pub fn condition_predicates(condition: &MemberSearchCondition) -> [Option<Predicate>; 4] {
    [
        username_eq(condition.username()),
        team_name_eq(condition.team_name()),
        age_goe(condition.age_goe()),
        age_loe(condition.age_loe()),
    ]
}
