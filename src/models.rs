use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::assignments::EntityList;
use crate::entity::EntityKind;
use crate::resolver::{ParameterKeys, ResolutionReport};
use crate::state::ResolverState;
use crate::task::Task;

/// Work item parameters plus, optionally, the task they apply to.
#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct ResolveRequest {
    /// Parameter values must be strings or null.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: Map<String, Value>,
    /// Task to update; a fresh one is used when omitted.
    #[serde(default)]
    pub task: Option<Task>,
}

impl ResolveRequest {
    pub fn new(parameters: Map<String, Value>) -> Self {
        Self {
            parameters,
            task: None,
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct ResolveResponse {
    pub task: Task,
    pub report: ResolutionReport,
}

#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct ParseRequest {
    pub ids: Option<String>,
    pub kind: EntityKind,
}

#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct ParseResponse {
    pub entities: EntityList,
}

#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct StatusResponse {
    pub administrator: String,
    pub separator: String,
    pub parameter_keys: ParameterKeys,
    pub started: DateTime<Utc>,
    pub resolutions: u64,
}

impl From<&ResolverState> for StatusResponse {
    fn from(state: &ResolverState) -> Self {
        let config = state.resolver.config();
        StatusResponse {
            administrator: config.administrator.clone(),
            separator: config.separator.to_string(),
            parameter_keys: config.keys.clone(),
            started: state.started,
            resolutions: state.resolutions(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct VersionResponse {
    pub version: String,
    pub git_sha: Option<String>,
    pub rustc: Option<String>,
    pub target: Option<String>,
    pub built_at: Option<DateTime<Utc>>,
}
