use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assignments::PeopleAssignments;
use crate::entity::OrganizationalEntity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskData {
    #[serde(default)]
    pub created_by: Option<OrganizationalEntity>,
}

/// The parts of a human task this crate reads and writes.
///
/// `people_assignments` stays `None` until something asks for it, see
/// [`AssignmentResolver::get_or_create_assignments`](crate::resolver::AssignmentResolver::get_or_create_assignments).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    #[serde(default)]
    pub people_assignments: Option<PeopleAssignments>,
    #[serde(default)]
    pub task_data: TaskData,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_by(&self) -> Option<&OrganizationalEntity> {
        self.task_data.created_by.as_ref()
    }
}
