use sqlx::{Postgres, QueryBuilder};

use super::predicates::{Column, Predicate};
use crate::domain::member::MemberSortKey;
use crate::domain::page::{Direction, PageRequest, Sort};
use crate::domain::repositories::{RepositoryError, RepositoryResult};

const MEMBER_COLUMNS: &str = "m.id, m.username, m.age, m.team_id";
const MEMBER_TEAM_COLUMNS: &str = "m.id, m.username, m.age, m.team_id, t.name AS team_name";

/// What a query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Member columns only
    Member,
    /// Member columns plus the joined team name
    MemberTeam,
    /// `COUNT(*)`
    Count,
}

/// Typed SELECT over `members m`, optionally left-joined to `teams t`
///
/// Values never reach the SQL text: every predicate and the page window are
/// bound as parameters when the query is rendered.
///
/// # Example
/// ```
/// use member_search_api::infrastructure::query::predicates::{age_goe, username_eq};
/// use member_search_api::infrastructure::query::MemberQuery;
///
/// let query = MemberQuery::select_from_member()
///     .left_join_team()
///     .where_all([username_eq(None), age_goe(Some(20))]);
///
/// assert_eq!(
///     query.to_query_builder().sql(),
///     "SELECT m.id, m.username, m.age, m.team_id, t.name AS team_name \
///      FROM members m LEFT JOIN teams t ON t.id = m.team_id WHERE m.age >= $1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    projection: Projection,
    join_team: bool,
    predicates: Vec<Predicate>,
    orders: Vec<(Column, Direction)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl MemberQuery {
    /// `SELECT <projection> FROM members m`
    pub fn select(projection: Projection) -> Self {
        Self {
            projection,
            join_team: projection == Projection::MemberTeam,
            predicates: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Shorthand for selecting whole member rows
    pub fn select_from_member() -> Self {
        Self::select(Projection::Member)
    }

    /// Adds `LEFT JOIN teams t` and selects the team name with each member
    pub fn left_join_team(mut self) -> Self {
        self.join_team = true;
        if self.projection == Projection::Member {
            self.projection = Projection::MemberTeam;
        }
        self
    }

    /// ANDs every present predicate into the WHERE clause
    ///
    /// A predicate on a team column brings in the `teams` join; the
    /// projection is left unchanged.
    pub fn where_all<I>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        self.predicates.extend(predicates.into_iter().flatten());
        if self.requires_team_join() {
            self.join_team = true;
        }
        self
    }

    /// Appends ORDER BY terms for a page request's sort
    ///
    /// # Errors
    /// `RepositoryError::InvalidSort` for unknown properties, or for a team
    /// property when the query has no team join.
    pub fn order_by(mut self, sort: &Sort) -> RepositoryResult<Self> {
        for order in sort.orders() {
            let column = MemberSortKey::parse(&order.property)
                .map(sort_column)
                .filter(|c| self.join_team || !c.is_team_column())
                .ok_or_else(|| RepositoryError::InvalidSort(order.property.clone()))?;
            self.orders.push((column, order.direction));
        }
        Ok(self)
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Applies a page request's sort and LIMIT/OFFSET window
    pub fn paged(self, page: &PageRequest) -> RepositoryResult<Self> {
        Ok(self
            .order_by(page.sort())?
            .limit(page.limit())
            .offset(page.offset()))
    }

    /// Count over the same FROM/JOIN/WHERE, without ordering or window
    pub fn count_query(&self) -> Self {
        Self {
            projection: Projection::Count,
            join_team: self.join_team,
            predicates: self.predicates.clone(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Whether any predicate references the team table
    pub fn requires_team_join(&self) -> bool {
        self.predicates.iter().any(Predicate::requires_team_join)
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Renders the query into a sqlx builder with bound parameters
    pub fn to_query_builder(&self) -> QueryBuilder<'static, Postgres> {
        let columns = match self.projection {
            Projection::Member => MEMBER_COLUMNS,
            Projection::MemberTeam => MEMBER_TEAM_COLUMNS,
            Projection::Count => "COUNT(*)",
        };

        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(columns).push(" FROM members m");

        if self.join_team {
            builder.push(" LEFT JOIN teams t ON t.id = m.team_id");
        }

        for (i, predicate) in self.predicates.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(&mut builder);
        }

        // Pages need a total order; member id breaks ties.
        let mut orders = self.orders.clone();
        if self.limit.is_some() && !orders.iter().any(|(c, _)| *c == Column::MemberId) {
            orders.push((Column::MemberId, Direction::Asc));
        }

        for (i, (column, direction)) in orders.iter().enumerate() {
            builder.push(if i == 0 { " ORDER BY " } else { ", " });
            builder.push(column.as_sql()).push(" ").push(direction.as_sql());
        }

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        if let Some(offset) = self.offset {
            builder.push(" OFFSET ").push_bind(offset);
        }

        builder
    }
}

fn sort_column(key: MemberSortKey) -> Column {
    match key {
        MemberSortKey::Id => Column::MemberId,
        MemberSortKey::Username => Column::MemberUsername,
        MemberSortKey::Age => Column::MemberAge,
        MemberSortKey::TeamName => Column::TeamName,
    }
}
