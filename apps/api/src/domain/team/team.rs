use uuid::Uuid;

/// Team entity
///
/// A named group that members may belong to. Members reference a team by id;
/// the team itself holds no member list.
///
/// # Example
/// ```
/// use member_search_api::domain::team::Team;
///
/// let team = Team::new("teamA").expect("valid team");
/// assert_eq!(team.name(), "teamA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    name: String,
}

impl Team {
    /// Creates a new Team with a generated id
    ///
    /// # Returns
    /// * `Ok(Team)` - New team
    /// * `Err(String)` - If the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
        })
    }

    /// Returns the team's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the team
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        self.name = name;
        Ok(())
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: Uuid, name: String) -> Self {
        Self { id, name }
    }
}
