use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::member::{Member, MemberSearchCondition, MemberTeam};
use crate::domain::page::{Page, PageRequest};

/// Repository trait for Member entities
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a member (insert or update)
    async fn save(&self, member: &Member) -> RepositoryResult<()>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Member>>;

    /// Delete a member by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// Dynamic, paginated member search
///
/// The three paged variants return the same rows for the same input. They
/// differ only in how the total count is obtained:
/// - `search_page_by_apply_page` pages a hand-built query and counts it
/// - `search_page_simple` hands the content query to the pagination helper,
///   which derives the count from it
/// - `search_page_complex` supplies a separate, leaner count query that joins
///   `teams` only when a team filter is set
#[async_trait]
pub trait MemberSearchRepository: Send + Sync {
    /// All members, `select(member).from(member)` form
    async fn basic_select(&self) -> RepositoryResult<Vec<Member>>;

    /// All members, `select_from(member)` shorthand
    async fn basic_select_from(&self) -> RepositoryResult<Vec<Member>>;

    async fn search_page_by_apply_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>>;

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>>;

    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> RepositoryResult<Page<MemberTeam>>;
}


#[cfg(test)]
mod tests {
    use super::mock::InMemoryMemberStore;
    use super::*;
    use crate::domain::page::{Order, Sort};
    use crate::domain::repositories::errors::RepositoryError;
    use crate::domain::team::Team;

    /// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40);
    /// no team: loner (50)
    fn store() -> InMemoryMemberStore {
        let team_a = Team::new("teamA").unwrap();
        let team_b = Team::new("teamB").unwrap();
        let store = InMemoryMemberStore::new();

        for (name, age, team) in [
            ("member1", 10, Some(&team_a)),
            ("member2", 20, Some(&team_a)),
            ("member3", 30, Some(&team_b)),
            ("member4", 40, Some(&team_b)),
            ("loner", 50, None),
        ] {
            let member = Member::new(name, age, team).unwrap();
            store.insert(&member, team);
        }

        store
    }

    #[tokio::test]
    async fn unset_condition_matches_all_rows() {
        let store = store();
        let page = store
            .search_page_simple(&MemberSearchCondition::new(), &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.number_of_elements(), 5);
    }

    #[tokio::test]
    async fn combined_filters_are_anded() {
        let store = store();
        let condition = MemberSearchCondition::new()
            .with_team_name("teamB")
            .with_age_goe(35)
            .with_age_loe(40);

        let page = store
            .search_page_complex(&condition, &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].username, "member4");
    }

    #[tokio::test]
    async fn total_counts_rows_beyond_the_page() {
        let store = store();
        let request = PageRequest::new(0, 2)
            .unwrap()
            .with_sort(Sort::by(Order::asc("age")));

        let page = store
            .search_page_by_apply_page(&MemberSearchCondition::new().with_age_goe(20), &request)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages(), 2);
        let names: Vec<_> = page.content.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["member2", "member3"]);
    }

    #[tokio::test]
    async fn descending_sort_and_second_page() {
        let store = store();
        let request = PageRequest::new(1, 2)
            .unwrap()
            .with_sort(Sort::by(Order::desc("age")));

        let page = store
            .search_page_simple(&MemberSearchCondition::new(), &request)
            .await
            .unwrap();

        let ages: Vec<_> = page.content.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![30, 20]);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn unknown_sort_property_is_rejected() {
        let store = store();
        let request = PageRequest::default().with_sort(Sort::by(Order::asc("password")));

        let result = store
            .search_page_simple(&MemberSearchCondition::new(), &request)
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidSort(p)) if p == "password"));
    }

    #[tokio::test]
    async fn basic_select_returns_every_member() {
        let store = store();
        assert_eq!(store.basic_select().await.unwrap().len(), 5);
        assert_eq!(store.basic_select_from().await.unwrap().len(), 5);
    }
}
