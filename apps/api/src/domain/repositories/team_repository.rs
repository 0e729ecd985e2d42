use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::team::Team;

/// Repository trait for Team entities
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> RepositoryResult<()>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Team>>;

    /// Find all teams with the given name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>>;

    /// Delete a team by ID
    ///
    /// Members of the team are detached, not deleted.
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}
