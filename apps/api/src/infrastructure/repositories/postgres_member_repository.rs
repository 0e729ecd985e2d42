use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::member::{Member, MemberSearchCondition, MemberTeam};
use crate::domain::page::{Page, PageRequest};
use crate::domain::repositories::{
    MemberRepository, MemberSearchRepository, RepositoryError, RepositoryResult,
};
use crate::infrastructure::query::predicates::{
    age_goe, age_loe, condition_predicates, team_name_eq, username_eq,
};
use crate::infrastructure::query::{MemberQuery, Projection, QuerySupport};

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    username: String,
    age: i32,
    team_id: Option<Uuid>,
}

impl From<MemberRow> for Member {
    fn from(r: MemberRow) -> Self {
        Member::from_persistence(r.id, r.username, r.age, r.team_id)
    }
}

/// PostgreSQL implementation of the member repositories
///
/// Searches are assembled with [`MemberQuery`] and executed through
/// [`QuerySupport`], so every filter value is a bound parameter.
pub struct PostgresMemberRepository {
    support: QuerySupport,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self {
            support: QuerySupport::new(pool),
        }
    }

    fn pool(&self) -> &PgPool {
        self.support.pool()
    }

    /// Joined, filtered search query without paging
    fn search_query(condition: &MemberSearchCondition) -> MemberQuery {
        MemberQuery::select_from_member()
            .left_join_team()
            .where_all(condition_predicates(condition))
    }

    /// Count query for `search_page_complex`
    ///
    /// Selects from `members` alone; `where_all` adds the `teams` join only
    /// when the team name filter is set.
    fn complex_count_query(condition: &MemberSearchCondition) -> MemberQuery {
        MemberQuery::select_from_member().where_all([
            username_eq(condition.username()),
            team_name_eq(condition.team_name()),
            age_goe(condition.age_goe()),
            age_loe(condition.age_loe()),
        ])
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO members (id, username, age, team_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                age = EXCLUDED.age,
                team_id = EXCLUDED.team_id
            "#,
        )
        .bind(member.id())
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, username, age, team_id
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Member::from))
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Member not found: {}", id)));
        }

        Ok(())
    }
}

#[async_trait]
impl MemberSearchRepository for PostgresMemberRepository {
    async fn basic_select(&self) -> RepositoryResult<Vec<Member>> {
        let rows: Vec<MemberRow> = self
            .support
            .fetch(&MemberQuery::select(Projection::Member))
            .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn basic_select_from(&self) -> RepositoryResult<Vec<Member>> {
        let rows: Vec<MemberRow> = self
            .support
            .fetch(&MemberQuery::select_from_member())
            .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn search_page_by_apply_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let query = Self::search_query(condition);

        let content: Vec<MemberTeam> = self.support.fetch(&query.clone().paged(page)?).await?;
        let total = self.support.fetch_count(&query).await?;

        Ok(Page::new(content, page, total))
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        self.support
            .apply_pagination(page, Self::search_query(condition))
            .await
    }

    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>> {
        self.support
            .apply_pagination_with_count(
                page,
                Self::search_query(condition),
                Self::complex_count_query(condition),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_sql(condition: &MemberSearchCondition) -> String {
        PostgresMemberRepository::complex_count_query(condition)
            .count_query()
            .to_query_builder()
            .sql()
            .to_string()
    }

    #[test]
    fn complex_count_skips_join_without_team_filter() {
        let condition = MemberSearchCondition::new()
            .with_username("member1")
            .with_age_goe(10);

        assert_eq!(
            count_sql(&condition),
            "SELECT COUNT(*) FROM members m WHERE m.username = $1 AND m.age >= $2"
        );
    }

    #[test]
    fn complex_count_joins_teams_for_team_filter() {
        let condition = MemberSearchCondition::new()
            .with_team_name("teamB")
            .with_age_loe(40);

        assert_eq!(
            count_sql(&condition),
            "SELECT COUNT(*) FROM members m LEFT JOIN teams t ON t.id = m.team_id \
             WHERE t.name = $1 AND m.age <= $2"
        );
    }

    #[test]
    fn complex_count_of_empty_condition_counts_every_member() {
        assert_eq!(
            count_sql(&MemberSearchCondition::new()),
            "SELECT COUNT(*) FROM members m"
        );
    }

    #[test]
    fn content_query_always_joins_teams() {
        let sql = PostgresMemberRepository::search_query(&MemberSearchCondition::new())
            .to_query_builder()
            .sql()
            .to_string();

        assert!(sql.contains("t.name AS team_name"));
        assert!(sql.contains("LEFT JOIN teams t ON t.id = m.team_id"));
    }
}
