use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use super::select::MemberQuery;
use crate::domain::page::{Page, PageRequest};
use crate::domain::repositories::RepositoryResult;

/// Execution helpers shared by query-based repositories
///
/// Wraps the pool and turns [`MemberQuery`] values into rows, counts and pages.
#[derive(Debug, Clone)]
pub struct QuerySupport {
    pool: PgPool,
}

impl QuerySupport {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a query and maps every row
    pub async fn fetch<T>(&self, query: &MemberQuery) -> RepositoryResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut builder = query.to_query_builder();
        tracing::debug!(sql = builder.sql(), "fetching rows");

        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Runs a query as `COUNT(*)`, whatever its projection
    pub async fn fetch_count(&self, query: &MemberQuery) -> RepositoryResult<u64> {
        let mut builder = query.count_query().to_query_builder();
        tracing::debug!(sql = builder.sql(), "counting rows");

        let (total,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    /// Pages a content query and counts it with the same FROM/JOIN/WHERE
    pub async fn apply_pagination<T>(
        &self,
        page: &PageRequest,
        content_query: MemberQuery,
    ) -> RepositoryResult<Page<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let count_query = content_query.count_query();
        self.apply_pagination_with_count(page, content_query, count_query)
            .await
    }

    /// Pages a content query, counting with a separately built query
    ///
    /// The count query only needs the tables its predicates touch; it may
    /// leave out joins the content query uses for projection.
    pub async fn apply_pagination_with_count<T>(
        &self,
        page: &PageRequest,
        content_query: MemberQuery,
        count_query: MemberQuery,
    ) -> RepositoryResult<Page<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let content = self.fetch::<T>(&content_query.paged(page)?).await?;
        let total = self.fetch_count(&count_query).await?;

        tracing::debug!(
            page = page.page(),
            size = page.size(),
            returned = content.len(),
            total,
            "page fetched"
        );

        Ok(Page::new(content, page, total))
    }
}
