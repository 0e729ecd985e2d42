use sqlx::PgPool;

use crate::domain::member::Member;
use crate::domain::repositories::{MemberRepository, RepositoryError, RepositoryResult, TeamRepository};
use crate::domain::team::Team;
use crate::infrastructure::repositories::{PostgresMemberRepository, PostgresTeamRepository};

/// Number of members created by [`seed_sample_data`]
pub const SAMPLE_MEMBER_COUNT: i32 = 100;

/// Creates the `teams` and `members` tables if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id UUID PRIMARY KEY,
            username TEXT NOT NULL,
            age INTEGER NOT NULL,
            team_id UUID REFERENCES teams (id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_members_team_id ON members (team_id)")
        .execute(pool)
        .await?;

    tracing::debug!("schema ready");
    Ok(())
}

/// Inserts `teamA`, `teamB` and members `member0..member99`
///
/// Member `i` is `i` years old; even members join teamA, odd members teamB.
pub async fn seed_sample_data(pool: &PgPool) -> RepositoryResult<()> {
    let team_repo = PostgresTeamRepository::new(pool.clone());
    let member_repo = PostgresMemberRepository::new(pool.clone());

    let team_a = Team::new("teamA").map_err(RepositoryError::InvalidData)?;
    let team_b = Team::new("teamB").map_err(RepositoryError::InvalidData)?;
    team_repo.save(&team_a).await?;
    team_repo.save(&team_b).await?;

    for i in 0..SAMPLE_MEMBER_COUNT {
        let team = if i % 2 == 0 { &team_a } else { &team_b };
        let member =
            Member::new(format!("member{}", i), i, Some(team)).map_err(RepositoryError::InvalidData)?;
        member_repo.save(&member).await?;
    }

    tracing::info!(
        teams = 2,
        members = SAMPLE_MEMBER_COUNT,
        "sample data inserted"
    );
    Ok(())
}
