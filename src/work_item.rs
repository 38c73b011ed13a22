use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::errors::ServiceError;

pub const ACTOR_ID: &str = "ActorId";
pub const GROUP_ID: &str = "GroupId";
pub const BUSINESSADMINISTRATOR_ID: &str = "BusinessAdministratorId";
pub const TASKSTAKEHOLDER_ID: &str = "TaskStakeholderId";
pub const EXCLUDED_OWNER_ID: &str = "ExcludedOwnerId";
pub const RECIPIENT_ID: &str = "RecipientId";

/// Read access to the named parameters of a unit of work.
///
/// Absent keys and null values both read as `None`.
pub trait ParameterBag {
    fn parameter(&self, name: &str) -> Option<&str>;
}

impl ParameterBag for HashMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterBag for BTreeMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterBag for HashMap<String, Option<String>> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_deref())
    }
}

/// A work item as handed over by the workflow engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkItem {
    #[serde(default)]
    parameters: BTreeMap<String, Option<String>>,
}

impl WorkItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), Some(value.into()));
    }

    /// Store an explicit null for `name`.
    pub fn clear_parameter(&mut self, name: impl Into<String>) {
        self.parameters.insert(name.into(), None);
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl ParameterBag for WorkItem {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(|v| v.as_deref())
    }
}

/// Build a work item from a JSON object.
///
/// Strings and nulls are accepted. Any other value is rejected rather than
/// coerced, naming the offending parameter.
impl TryFrom<Map<String, Value>> for WorkItem {
    type Error = ServiceError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut parameters = BTreeMap::new();
        for (name, value) in map {
            let value = match value {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => {
                    return Err(ServiceError::InvalidParameter {
                        name,
                        found: json_type_name(&other),
                    });
                }
            };
            parameters.insert(name, value);
        }
        Ok(WorkItem { parameters })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_read_the_same() {
        let mut item = WorkItem::new();
        assert_eq!(item.parameter(ACTOR_ID), None);
        item.clear_parameter(ACTOR_ID);
        assert_eq!(item.parameter(ACTOR_ID), None);
        item.set_parameter(ACTOR_ID, "espiegelberg");
        assert_eq!(item.parameter(ACTOR_ID), Some("espiegelberg"));
    }

    #[test]
    fn accepts_strings_and_nulls_from_json() {
        let map = json!({ "ActorId": "john", "GroupId": null })
            .as_object()
            .cloned()
            .unwrap();
        let item = WorkItem::try_from(map).unwrap();
        assert_eq!(item.len(), 2);
        assert_eq!(item.parameter(ACTOR_ID), Some("john"));
        assert_eq!(item.parameter(GROUP_ID), None);
    }

    #[test]
    fn rejects_non_string_values() {
        let map = json!({ "RecipientId": 42 }).as_object().cloned().unwrap();
        match WorkItem::try_from(map) {
            Err(ServiceError::InvalidParameter { name, found }) => {
                assert_eq!(name, RECIPIENT_ID);
                assert_eq!(found, "number");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn plain_maps_are_bags() {
        let mut map = HashMap::new();
        map.insert(GROUP_ID.to_string(), "ops".to_string());
        assert_eq!(map.parameter(GROUP_ID), Some("ops"));
        assert_eq!(map.parameter(ACTOR_ID), None);
    }
}
