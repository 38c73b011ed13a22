use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ID of the administrator that every assignment record starts with.
pub const ADMINISTRATOR_ID: &str = "Administrator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Group,
}

impl EntityKind {
    pub fn from_is_user(is_user: bool) -> Self {
        if is_user {
            EntityKind::User
        } else {
            EntityKind::Group
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A party that can take part in a task: an individual user or a group.
///
/// The variant is decided by whoever creates the entity, never by looking at
/// the ID itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OrganizationalEntity {
    User(String),
    Group(String),
}

impl OrganizationalEntity {
    pub fn user(id: impl Into<String>) -> Self {
        OrganizationalEntity::User(id.into())
    }

    pub fn group(id: impl Into<String>) -> Self {
        OrganizationalEntity::Group(id.into())
    }

    /// Build a user when `is_user` is set, a group otherwise.
    pub fn materialize(token: &str, is_user: bool) -> Self {
        Self::new(token, EntityKind::from_is_user(is_user))
    }

    pub fn new(id: impl Into<String>, kind: EntityKind) -> Self {
        match kind {
            EntityKind::User => OrganizationalEntity::User(id.into()),
            EntityKind::Group => OrganizationalEntity::Group(id.into()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            OrganizationalEntity::User(id) | OrganizationalEntity::Group(id) => id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            OrganizationalEntity::User(_) => EntityKind::User,
            OrganizationalEntity::Group(_) => EntityKind::Group,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, OrganizationalEntity::User(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, OrganizationalEntity::Group(_))
    }
}

impl std::fmt::Display for OrganizationalEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationalEntity::User(id) => write!(f, "User::\"{id}\""),
            OrganizationalEntity::Group(id) => write!(f, "Group::\"{id}\""),
        }
    }
}
