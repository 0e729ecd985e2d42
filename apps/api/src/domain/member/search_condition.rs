use serde::{Deserialize, Serialize};

use super::member::MemberTeam;

/// Optional filters for a member search
///
/// Every field is optional. An unset field places no restriction on the
/// result; set fields are combined with logical AND. Text fields count as
/// set only when they contain non-whitespace characters.
///
/// # Example
/// ```
/// use member_search_api::domain::member::MemberSearchCondition;
///
/// let condition = MemberSearchCondition::new()
///     .with_team_name("teamB")
///     .with_age_goe(35)
///     .with_age_loe(40);
///
/// assert_eq!(condition.team_name(), Some("teamB"));
/// assert_eq!(condition.username(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "teamName")]
    pub team_name: Option<String>,
    #[serde(default, alias = "ageGoe")]
    pub age_goe: Option<i32>,
    #[serde(default, alias = "ageLoe")]
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Username filter, if it has text
    pub fn username(&self) -> Option<&str> {
        has_text(self.username.as_deref())
    }

    /// Team name filter, if it has text
    pub fn team_name(&self) -> Option<&str> {
        has_text(self.team_name.as_deref())
    }

    /// Lower age bound (inclusive)
    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    /// Upper age bound (inclusive)
    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    /// Returns true when no filter is set
    pub fn is_empty(&self) -> bool {
        self.username().is_none()
            && self.team_name().is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }

    /// Evaluates the condition against a search row in memory
    ///
    /// A row without a team never matches a team name filter, the same way
    /// `t.name = $1` is never true for a NULL left-joined column.
    pub fn matches(&self, row: &MemberTeam) -> bool {
        if let Some(username) = self.username() {
            if row.username != username {
                return false;
            }
        }

        if let Some(team_name) = self.team_name() {
            if row.team_name.as_deref() != Some(team_name) {
                return false;
            }
        }

        if let Some(goe) = self.age_goe {
            if row.age < goe {
                return false;
            }
        }

        if let Some(loe) = self.age_loe {
            if row.age > loe {
                return false;
            }
        }

        true
    }
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(username: &str, age: i32, team_name: Option<&str>) -> MemberTeam {
        MemberTeam {
            id: Uuid::new_v4(),
            username: username.to_string(),
            age,
            team_id: team_name.map(|_| Uuid::new_v4()),
            team_name: team_name.map(str::to_string),
        }
    }

    #[test]
    fn blank_text_filters_are_unset() {
        let condition = MemberSearchCondition::new()
            .with_username("")
            .with_team_name("   ");

        assert_eq!(condition.username(), None);
        assert_eq!(condition.team_name(), None);
        assert!(condition.is_empty());
    }

    #[test]
    fn empty_condition_matches_everything() {
        let condition = MemberSearchCondition::new();

        assert!(condition.matches(&row("member1", 10, Some("teamA"))));
        assert!(condition.matches(&row("member2", 99, None)));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let condition = MemberSearchCondition::new().with_age_goe(35).with_age_loe(40);

        assert!(!condition.matches(&row("m", 34, None)));
        assert!(condition.matches(&row("m", 35, None)));
        assert!(condition.matches(&row("m", 40, None)));
        assert!(!condition.matches(&row("m", 41, None)));
    }

    #[test]
    fn filters_combine_with_and() {
        let condition = MemberSearchCondition::new()
            .with_team_name("teamB")
            .with_age_goe(35);

        assert!(condition.matches(&row("member4", 40, Some("teamB"))));
        assert!(!condition.matches(&row("member3", 30, Some("teamB"))));
        assert!(!condition.matches(&row("member2", 40, Some("teamA"))));
    }

    #[test]
    fn team_filter_excludes_members_without_team() {
        let condition = MemberSearchCondition::new().with_team_name("teamA");
        assert!(!condition.matches(&row("loner", 20, None)));
    }

    #[test]
    fn deserializes_camel_case_aliases() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"teamName":"teamB","ageGoe":35,"ageLoe":40}"#).unwrap();

        assert_eq!(condition.team_name(), Some("teamB"));
        assert_eq!(condition.age_goe(), Some(35));
        assert_eq!(condition.age_loe(), Some(40));
        assert_eq!(condition.username(), None);
    }

    #[test]
    fn deserializes_empty_object() {
        let condition: MemberSearchCondition = serde_json::from_str("{}").unwrap();
        assert!(condition.is_empty());
    }
}
