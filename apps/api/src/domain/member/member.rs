use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::Team;

/// Member entity
///
/// # Invariants
/// - Username cannot be blank
/// - Age cannot be negative
///
/// # Example
/// ```
/// use member_search_api::domain::member::Member;
/// use member_search_api::domain::team::Team;
///
/// let team = Team::new("teamA").expect("valid team");
/// let member = Member::new("member1", 10, Some(&team)).expect("valid member");
///
/// assert_eq!(member.team_id(), Some(team.id()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Uuid,
    username: String,
    age: i32,
    team_id: Option<Uuid>,
}

impl Member {
    /// Creates a new Member, optionally assigned to a team
    ///
    /// # Returns
    /// * `Ok(Member)` - New member
    /// * `Err(String)` - If the username is blank or the age is negative
    pub fn new(username: impl Into<String>, age: i32, team: Option<&Team>) -> Result<Self, String> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        if age < 0 {
            return Err(format!("Age cannot be negative: {}", age));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            age,
            team_id: team.map(Team::id),
        })
    }

    /// Moves the member to another team
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = Some(team.id());
    }

    /// Detaches the member from its team
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    // ===== Getters =====

    /// Returns the member's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the member's username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the member's age
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the ID of the team the member belongs to, if any
    pub fn team_id(&self) -> Option<Uuid> {
        self.team_id
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: Uuid, username: String, age: i32, team_id: Option<Uuid>) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}

/// Member joined with its (optional) team, as returned by searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberTeam {
    pub id: Uuid,
    pub username: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

impl MemberTeam {
    /// Builds the read model from a member and the team it references
    pub fn new(member: &Member, team: Option<&Team>) -> Self {
        Self {
            id: member.id(),
            username: member.username().to_string(),
            age: member.age(),
            team_id: member.team_id(),
            team_name: team.map(|t| t.name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_member_without_team() {
        let member = Member::new("member1", 10, None).unwrap();

        assert_eq!(member.username(), "member1");
        assert_eq!(member.age(), 10);
        assert!(member.team_id().is_none());
    }

    #[test]
    fn create_member_with_blank_username_fails() {
        let result = Member::new(" ", 10, None);
        assert!(result.unwrap_err().contains("Username cannot be empty"));
    }

    #[test]
    fn create_member_with_negative_age_fails() {
        let result = Member::new("member1", -1, None);
        assert!(result.unwrap_err().contains("negative"));
    }

    #[test]
    fn zero_age_is_allowed() {
        assert!(Member::new("newborn", 0, None).is_ok());
    }

    #[test]
    fn change_and_leave_team() {
        let team_a = Team::new("teamA").unwrap();
        let team_b = Team::new("teamB").unwrap();
        let mut member = Member::new("member1", 10, Some(&team_a)).unwrap();

        member.change_team(&team_b);
        assert_eq!(member.team_id(), Some(team_b.id()));

        member.leave_team();
        assert_eq!(member.team_id(), None);
    }

    #[test]
    fn member_team_carries_team_name() {
        let team = Team::new("teamA").unwrap();
        let member = Member::new("member1", 10, Some(&team)).unwrap();

        let view = MemberTeam::new(&member, Some(&team));
        assert_eq!(view.id, member.id());
        assert_eq!(view.team_id, Some(team.id()));
        assert_eq!(view.team_name.as_deref(), Some("teamA"));
    }

    #[test]
    fn member_team_serializes_to_json() {
        let member = Member::new("member1", 10, None).unwrap();
        let json = serde_json::to_value(MemberTeam::new(&member, None)).unwrap();

        assert_eq!(json["username"], "member1");
        assert_eq!(json["age"], 10);
        assert!(json["team_name"].is_null());
    }
}
