//! Resolution of work item parameters into task people assignments.
//!
//! Each parameter holds a delimited list of IDs. Every ID becomes a user or a
//! group, depending only on which parameter it came from, and is appended to
//! the matching role list of the task unless that list already has it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use utoipa::ToSchema;

use crate::assignments::{PeopleAssignments, Role};
use crate::entity::{ADMINISTRATOR_ID, OrganizationalEntity};
use crate::errors::ServiceError;
use crate::parser::{DEFAULT_SEPARATOR, split_ids};
use crate::task::Task;
use crate::work_item::{
    ACTOR_ID, BUSINESSADMINISTRATOR_ID, EXCLUDED_OWNER_ID, GROUP_ID, ParameterBag, RECIPIENT_ID,
    TASKSTAKEHOLDER_ID,
};

/// Names of the work item parameters read by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParameterKeys {
    pub actor_id: String,
    pub group_id: String,
    pub business_administrator_id: String,
    pub task_stakeholder_id: String,
    pub excluded_owner_id: String,
    pub recipient_id: String,
}

impl Default for ParameterKeys {
    fn default() -> Self {
        Self {
            actor_id: ACTOR_ID.to_string(),
            group_id: GROUP_ID.to_string(),
            business_administrator_id: BUSINESSADMINISTRATOR_ID.to_string(),
            task_stakeholder_id: TASKSTAKEHOLDER_ID.to_string(),
            excluded_owner_id: EXCLUDED_OWNER_ID.to_string(),
            recipient_id: RECIPIENT_ID.to_string(),
        }
    }
}

impl ParameterKeys {
    fn all(&self) -> [&str; 6] {
        [
            self.actor_id.as_str(),
            self.group_id.as_str(),
            self.business_administrator_id.as_str(),
            self.task_stakeholder_id.as_str(),
            self.excluded_owner_id.as_str(),
            self.recipient_id.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolverConfig {
    /// User that heads every business administrator list.
    pub administrator: String,
    /// Character separating IDs inside one parameter value.
    #[schema(value_type = String)]
    pub separator: char,
    pub keys: ParameterKeys,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            administrator: ADMINISTRATOR_ID.to_string(),
            separator: DEFAULT_SEPARATOR,
            keys: ParameterKeys::default(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.administrator.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "administrator id must not be blank".to_string(),
            ));
        }
        if self.administrator.trim() != self.administrator {
            return Err(ServiceError::InvalidConfig(format!(
                "administrator id '{}' has surrounding whitespace",
                self.administrator
            )));
        }
        if self.administrator.contains(self.separator) {
            return Err(ServiceError::InvalidConfig(format!(
                "administrator id '{}' contains the separator '{}'",
                self.administrator, self.separator
            )));
        }
        if self.separator.is_whitespace() {
            return Err(ServiceError::InvalidConfig(
                "separator must not be whitespace".to_string(),
            ));
        }

        let keys = self.keys.all();
        for (i, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(ServiceError::InvalidConfig(
                    "parameter keys must not be empty".to_string(),
                ));
            }
            if keys[..i].contains(key) {
                return Err(ServiceError::InvalidConfig(format!(
                    "parameter key '{}' is used for more than one role",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// What [`AssignmentResolver::resolve_all`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolutionReport {
    /// Entities appended, per role.
    pub added: BTreeMap<Role, usize>,
    /// IDs that were already present in their role list, per role.
    pub duplicates: BTreeMap<Role, usize>,
    pub created_by: Option<OrganizationalEntity>,
}

impl ResolutionReport {
    fn record(&mut self, role: Role, outcome: Outcome) {
        *self.added.entry(role).or_default() += outcome.added;
        *self.duplicates.entry(role).or_default() += outcome.duplicates;
    }

    pub fn total_added(&self) -> usize {
        self.added.values().sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.duplicates.values().sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    added: usize,
    duplicates: usize,
}

/// Fills task role lists from work item parameters.
#[derive(Debug, Clone, Default)]
pub struct AssignmentResolver {
    config: ResolverConfig,
}

impl AssignmentResolver {
    pub fn new(config: ResolverConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The task's assignment record, created with the administrator if missing.
    pub fn get_or_create_assignments<'a>(&self, task: &'a mut Task) -> &'a mut PeopleAssignments {
        self.assignments_in(&mut task.people_assignments)
    }

    /// Actor IDs become user potential owners; the first one becomes the task creator.
    pub fn resolve_actors(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
        created_by: &mut Option<OrganizationalEntity>,
    ) -> usize {
        self.actors(bag, assignments, created_by).added
    }

    /// Group IDs become group potential owners.
    pub fn resolve_groups(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> usize {
        self.groups(bag, assignments).added
    }

    pub fn resolve_business_administrators(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> usize {
        self.business_administrators(bag, assignments).added
    }

    pub fn resolve_task_stakeholders(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> usize {
        self.task_stakeholders(bag, assignments).added
    }

    pub fn resolve_excluded_owners(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> usize {
        self.excluded_owners(bag, assignments).added
    }

    pub fn resolve_recipients(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> usize {
        self.recipients(bag, assignments).added
    }

    /// Run every resolution against `task`, creating its record if needed.
    ///
    /// Order: actors, groups, business administrators, task stakeholders,
    /// excluded owners, recipients.
    pub fn resolve_all(&self, bag: &impl ParameterBag, task: &mut Task) -> ResolutionReport {
        let mut report = ResolutionReport::default();

        // Split borrow: the record and the creator live side by side on the task.
        let Task {
            people_assignments,
            task_data,
        } = task;
        let assignments = self.assignments_in(people_assignments);

        report.record(
            Role::PotentialOwners,
            self.actors(bag, assignments, &mut task_data.created_by),
        );
        report.record(Role::PotentialOwners, self.groups(bag, assignments));
        report.record(
            Role::BusinessAdministrators,
            self.business_administrators(bag, assignments),
        );
        report.record(Role::TaskStakeholders, self.task_stakeholders(bag, assignments));
        report.record(Role::ExcludedOwners, self.excluded_owners(bag, assignments));
        report.record(Role::Recipients, self.recipients(bag, assignments));
        report.created_by = task_data.created_by.clone();

        debug!(
            message = "Resolved people assignments",
            added = report.total_added(),
            duplicates = report.total_duplicates(),
            created_by = ?report.created_by
        );
        report
    }

    fn assignments_in<'a>(
        &self,
        slot: &'a mut Option<PeopleAssignments>,
    ) -> &'a mut PeopleAssignments {
        slot.get_or_insert_with(|| {
            PeopleAssignments::with_administrator(&self.config.administrator)
        })
    }

    fn actors(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
        created_by: &mut Option<OrganizationalEntity>,
    ) -> Outcome {
        let raw = bag.parameter(&self.config.keys.actor_id);
        if let Some(first) = split_ids(raw, self.config.separator).next() {
            *created_by = Some(OrganizationalEntity::user(first));
        }
        self.assign(raw, assignments, Role::PotentialOwners, true)
    }

    fn business_administrators(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> Outcome {
        if assignments.ensure_administrator(&self.config.administrator) {
            debug!(
                message = "Restored default administrator",
                administrator = %self.config.administrator
            );
        }
        let raw = bag.parameter(&self.config.keys.business_administrator_id);
        self.assign(raw, assignments, Role::BusinessAdministrators, true)
    }

    fn groups(&self, bag: &impl ParameterBag, assignments: &mut PeopleAssignments) -> Outcome {
        let raw = bag.parameter(&self.config.keys.group_id);
        self.assign(raw, assignments, Role::PotentialOwners, false)
    }

    fn task_stakeholders(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> Outcome {
        let raw = bag.parameter(&self.config.keys.task_stakeholder_id);
        self.assign(raw, assignments, Role::TaskStakeholders, true)
    }

    fn excluded_owners(
        &self,
        bag: &impl ParameterBag,
        assignments: &mut PeopleAssignments,
    ) -> Outcome {
        let raw = bag.parameter(&self.config.keys.excluded_owner_id);
        self.assign(raw, assignments, Role::ExcludedOwners, true)
    }

    fn recipients(&self, bag: &impl ParameterBag, assignments: &mut PeopleAssignments) -> Outcome {
        let raw = bag.parameter(&self.config.keys.recipient_id);
        self.assign(raw, assignments, Role::Recipients, true)
    }

    fn assign(
        &self,
        raw: Option<&str>,
        assignments: &mut PeopleAssignments,
        role: Role,
        is_user: bool,
    ) -> Outcome {
        let list = assignments.list_mut(role);
        let mut outcome = Outcome::default();
        for id in split_ids(raw, self.config.separator) {
            if list.push(OrganizationalEntity::materialize(id, is_user)) {
                outcome.added += 1;
            } else {
                outcome.duplicates += 1;
                trace!(message = "Skipping duplicate assignment", role = %role, id = id);
            }
        }
        if outcome.added > 0 || outcome.duplicates > 0 {
            debug!(
                message = "Assigned entities",
                role = %role,
                is_user = is_user,
                added = outcome.added,
                duplicates = outcome.duplicates
            );
        }
        outcome
    }
}
