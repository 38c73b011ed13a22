use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{EntityKind, OrganizationalEntity};
use crate::parser::split_ids;

/// Ordered list of entities holding each ID at most once.
///
/// Order is first insertion. Uniqueness is by ID only, so a user and a group
/// sharing an ID cannot both be in the same list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<OrganizationalEntity>", into = "Vec<OrganizationalEntity>")]
pub struct EntityList(Vec<OrganizationalEntity>);

impl EntityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entity` unless its ID is already present. Returns whether it was added.
    pub fn push(&mut self, entity: OrganizationalEntity) -> bool {
        if self.contains_id(entity.id()) {
            return false;
        }
        self.0.push(entity);
        true
    }

    /// Put `entity` first unless its ID is already present.
    pub fn push_front(&mut self, entity: OrganizationalEntity) -> bool {
        if self.contains_id(entity.id()) {
            return false;
        }
        self.0.insert(0, entity);
        true
    }

    /// Take out the entry holding `id`, if any.
    pub fn remove_id(&mut self, id: &str) -> Option<OrganizationalEntity> {
        let index = self.0.iter().position(|e| e.id() == id)?;
        Some(self.0.remove(index))
    }

    /// Materialize every ID in `raw` and append the new ones.
    ///
    /// Returns the number of entities added.
    pub fn extend_from_ids(&mut self, raw: Option<&str>, separator: char, is_user: bool) -> usize {
        split_ids(raw, separator)
            .filter(|id| self.push(OrganizationalEntity::materialize(id, is_user)))
            .count()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.0.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, index: usize) -> Option<&OrganizationalEntity> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&OrganizationalEntity> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrganizationalEntity> {
        self.0.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(OrganizationalEntity::id).collect()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.0.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn as_slice(&self) -> &[OrganizationalEntity] {
        &self.0
    }
}

impl FromIterator<OrganizationalEntity> for EntityList {
    fn from_iter<I: IntoIterator<Item = OrganizationalEntity>>(iter: I) -> Self {
        let mut list = EntityList::new();
        for entity in iter {
            list.push(entity);
        }
        list
    }
}

impl From<Vec<OrganizationalEntity>> for EntityList {
    fn from(entities: Vec<OrganizationalEntity>) -> Self {
        entities.into_iter().collect()
    }
}

impl From<EntityList> for Vec<OrganizationalEntity> {
    fn from(list: EntityList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a EntityList {
    type Item = &'a OrganizationalEntity;
    type IntoIter = std::slice::Iter<'a, OrganizationalEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The role buckets of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PotentialOwners,
    BusinessAdministrators,
    TaskStakeholders,
    ExcludedOwners,
    Recipients,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::PotentialOwners,
        Role::BusinessAdministrators,
        Role::TaskStakeholders,
        Role::ExcludedOwners,
        Role::Recipients,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PotentialOwners => "potential_owners",
            Role::BusinessAdministrators => "business_administrators",
            Role::TaskStakeholders => "task_stakeholders",
            Role::ExcludedOwners => "excluded_owners",
            Role::Recipients => "recipients",
        }
    }

    /// Human readable title, used by the CLI.
    pub fn title(&self) -> &'static str {
        match self {
            Role::PotentialOwners => "Potential owners",
            Role::BusinessAdministrators => "Business administrators",
            Role::TaskStakeholders => "Task stakeholders",
            Role::ExcludedOwners => "Excluded owners",
            Role::Recipients => "Recipients",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// People assigned to a task, per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeopleAssignments {
    #[serde(default)]
    pub potential_owners: EntityList,
    #[serde(default)]
    pub business_administrators: EntityList,
    #[serde(default)]
    pub task_stakeholders: EntityList,
    #[serde(default)]
    pub excluded_owners: EntityList,
    #[serde(default)]
    pub recipients: EntityList,
}

impl PeopleAssignments {
    /// An empty record whose business administrators start with `administrator`.
    pub fn with_administrator(administrator: &str) -> Self {
        let mut assignments = PeopleAssignments::default();
        assignments.ensure_administrator(administrator);
        assignments
    }

    /// Make sure `User(administrator)` heads the business administrators.
    ///
    /// An entry with the same ID anywhere else in the list, user or group, is
    /// replaced by the user at the front. Returns whether the list changed.
    pub fn ensure_administrator(&mut self, administrator: &str) -> bool {
        let seeded = OrganizationalEntity::user(administrator);
        if self.business_administrators.first() == Some(&seeded) {
            return false;
        }
        self.business_administrators.remove_id(administrator);
        self.business_administrators.push_front(seeded)
    }

    pub fn list(&self, role: Role) -> &EntityList {
        match role {
            Role::PotentialOwners => &self.potential_owners,
            Role::BusinessAdministrators => &self.business_administrators,
            Role::TaskStakeholders => &self.task_stakeholders,
            Role::ExcludedOwners => &self.excluded_owners,
            Role::Recipients => &self.recipients,
        }
    }

    pub fn list_mut(&mut self, role: Role) -> &mut EntityList {
        match role {
            Role::PotentialOwners => &mut self.potential_owners,
            Role::BusinessAdministrators => &mut self.business_administrators,
            Role::TaskStakeholders => &mut self.task_stakeholders,
            Role::ExcludedOwners => &mut self.excluded_owners,
            Role::Recipients => &mut self.recipients,
        }
    }

    pub fn assign(&mut self, role: Role, entity: OrganizationalEntity) -> bool {
        self.list_mut(role).push(entity)
    }

    /// Number of entries over all roles.
    pub fn total(&self) -> usize {
        Role::ALL.iter().map(|role| self.list(*role).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ADMINISTRATOR_ID;

    #[test]
    fn push_suppresses_duplicate_ids() {
        let mut list = EntityList::new();
        assert!(list.push(OrganizationalEntity::user("john")));
        assert!(!list.push(OrganizationalEntity::user("john")));
        assert!(list.push(OrganizationalEntity::user("poul")));
        assert_eq!(list.ids(), vec!["john", "poul"]);
    }

    #[test]
    fn duplicate_check_ignores_variant() {
        let mut list = EntityList::new();
        assert!(list.push(OrganizationalEntity::user("x")));
        assert!(!list.push(OrganizationalEntity::group("x")));
        assert_eq!(list.len(), 1);
        assert!(list.first().unwrap().is_user());
    }

    #[test]
    fn extend_from_ids_counts_new_entries() {
        let mut list = EntityList::new();
        assert_eq!(list.extend_from_ids(Some("Software Developer"), ',', false), 1);
        assert_eq!(
            list.extend_from_ids(Some("Software Developer,Project Manager"), ',', false),
            1
        );
        assert_eq!(list.ids(), vec!["Software Developer", "Project Manager"]);
        assert_eq!(list.count_kind(EntityKind::Group), 2);
    }

    #[test]
    fn deserialization_drops_duplicates() {
        let list: EntityList = serde_json::from_str(
            r#"[{"kind":"user","id":"a"},{"kind":"group","id":"a"},{"kind":"user","id":"b"}]"#,
        )
        .unwrap();
        assert_eq!(list.ids(), vec!["a", "b"]);
    }

    #[test]
    fn same_id_allowed_across_roles() {
        let mut assignments = PeopleAssignments::default();
        assert!(assignments.assign(Role::PotentialOwners, OrganizationalEntity::user("john")));
        assert!(assignments.assign(Role::ExcludedOwners, OrganizationalEntity::user("john")));
        assert_eq!(assignments.total(), 2);
    }

    #[test]
    fn administrator_is_seeded_once() {
        let mut assignments = PeopleAssignments::with_administrator(ADMINISTRATOR_ID);
        assert!(!assignments.ensure_administrator(ADMINISTRATOR_ID));
        assert_eq!(assignments.business_administrators.ids(), vec![ADMINISTRATOR_ID]);
        assert!(assignments.potential_owners.is_empty());
    }

    #[test]
    fn administrator_goes_back_to_front() {
        let mut assignments = PeopleAssignments::default();
        assignments.assign(Role::BusinessAdministrators, OrganizationalEntity::user("drbug"));
        assert!(assignments.ensure_administrator(ADMINISTRATOR_ID));
        assert_eq!(
            assignments.business_administrators.ids(),
            vec![ADMINISTRATOR_ID, "drbug"]
        );
    }

    #[test]
    fn administrator_moves_ahead_of_earlier_entries() {
        let mut assignments = PeopleAssignments::default();
        assignments.assign(Role::BusinessAdministrators, OrganizationalEntity::user("drbug"));
        assignments.assign(
            Role::BusinessAdministrators,
            OrganizationalEntity::user(ADMINISTRATOR_ID),
        );
        assert!(assignments.ensure_administrator(ADMINISTRATOR_ID));
        assert_eq!(
            assignments.business_administrators.ids(),
            vec![ADMINISTRATOR_ID, "drbug"]
        );
    }

    #[test]
    fn administrator_group_is_replaced_by_user() {
        let mut assignments = PeopleAssignments::default();
        assignments.assign(
            Role::BusinessAdministrators,
            OrganizationalEntity::group(ADMINISTRATOR_ID),
        );
        assert!(assignments.ensure_administrator(ADMINISTRATOR_ID));
        assert_eq!(
            assignments.business_administrators.as_slice(),
            &[OrganizationalEntity::user(ADMINISTRATOR_ID)]
        );
    }

    #[test]
    fn remove_id_matches_any_variant() {
        let mut list: EntityList = vec![
            OrganizationalEntity::user("a"),
            OrganizationalEntity::group("b"),
        ]
        .into();
        assert_eq!(list.remove_id("b"), Some(OrganizationalEntity::group("b")));
        assert_eq!(list.remove_id("b"), None);
        assert_eq!(list.ids(), vec!["a"]);
    }
}
