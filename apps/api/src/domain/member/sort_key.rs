use std::cmp::Ordering;

use super::member::MemberTeam;

/// Properties a member search can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortKey {
    Id,
    Username,
    Age,
    TeamName,
}

impl MemberSortKey {
    /// Resolves a sort property name
    ///
    /// Accepts both the field name and the dotted path form used by
    /// page requests (`teamName`, `team_name`, `team.name`).
    pub fn parse(property: &str) -> Option<Self> {
        match property {
            "id" => Some(Self::Id),
            "username" => Some(Self::Username),
            "age" => Some(Self::Age),
            "teamName" | "team_name" | "team.name" => Some(Self::TeamName),
            _ => None,
        }
    }

    /// Compares two rows by this property, ascending
    ///
    /// Rows without a team sort after rows with one, matching Postgres'
    /// default `NULLS LAST` for ascending order.
    pub fn compare(&self, a: &MemberTeam, b: &MemberTeam) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Username => a.username.cmp(&b.username),
            Self::Age => a.age.cmp(&b.age),
            Self::TeamName => match (&a.team_name, &b.team_name) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn parse_known_properties() {
        assert_eq!(MemberSortKey::parse("age"), Some(MemberSortKey::Age));
        assert_eq!(MemberSortKey::parse("team.name"), Some(MemberSortKey::TeamName));
        assert_eq!(MemberSortKey::parse("teamName"), Some(MemberSortKey::TeamName));
        assert_eq!(MemberSortKey::parse("password"), None);
    }

    #[test]
    fn missing_team_sorts_last() {
        let with_team = MemberTeam {
            id: Uuid::new_v4(),
            username: "a".to_string(),
            age: 1,
            team_id: Some(Uuid::new_v4()),
            team_name: Some("teamZ".to_string()),
        };
        let without_team = MemberTeam {
            team_id: None,
            team_name: None,
            ..with_team.clone()
        };

        assert_eq!(
            MemberSortKey::TeamName.compare(&with_team, &without_team),
            Ordering::Less
        );
    }
}
