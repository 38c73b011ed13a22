use actix_web::{HttpResponse, web};
use prometheus::Registry;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::assignments::{EntityList, PeopleAssignments, Role};
use crate::build_info::build_info;
use crate::entity::{EntityKind, OrganizationalEntity};
use crate::errors::ServiceError;
use crate::metrics;
use crate::models::{
    ParseRequest, ParseResponse, ResolveRequest, ResolveResponse, StatusResponse, VersionResponse,
};
use crate::resolver::{ParameterKeys, ResolutionReport};
use crate::state::SharedResolverState;
use crate::task::{Task, TaskData};
use crate::work_item::WorkItem;

#[derive(OpenApi)]
#[openapi(
    paths(health, get_status, get_version, resolve_assignments, parse_entities),
    components(schemas(
        ResolveRequest,
        ResolveResponse,
        ParseRequest,
        ParseResponse,
        StatusResponse,
        VersionResponse,
        ResolutionReport,
        ParameterKeys,
        Task,
        TaskData,
        PeopleAssignments,
        EntityList,
        OrganizationalEntity,
        EntityKind,
        Role
    )),
    tags((name = "assignments", description = "Work item people assignment resolution"))
)]
pub struct ApiDoc;

/// Configure routes for the service.
pub fn init(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ServiceError::InvalidJsonPayload(err.to_string()).into());
    cfg.app_data(json_config)
        .route("/api/v1/health", web::get().to(health))
        .route("/api/v1/status", web::get().to(get_status))
        .route("/api/v1/version", web::get().to(get_version))
        .route("/api/v1/assignments", web::post().to(resolve_assignments))
        .route("/api/v1/entities", web::post().to(parse_entities))
        .route("/metrics", web::get().to(get_metrics));
}

#[utoipa::path(get, path = "/api/v1/health", tag = "assignments", responses((status = 200)))]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "assignments",
    responses((status = 200, body = StatusResponse))
)]
pub async fn get_status(state: web::Data<SharedResolverState>) -> web::Json<StatusResponse> {
    web::Json(StatusResponse::from(state.get_ref().as_ref()))
}

#[utoipa::path(
    get,
    path = "/api/v1/version",
    tag = "assignments",
    responses((status = 200, body = VersionResponse))
)]
pub async fn get_version() -> web::Json<VersionResponse> {
    web::Json(build_info().into())
}

/// Resolve the people assignments of a work item.
///
/// The supplied task is updated in place; without one a fresh task is used.
#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "assignments",
    request_body = ResolveRequest,
    responses(
        (status = 200, body = ResolveResponse),
        (status = 400, description = "A parameter is neither a string nor null")
    )
)]
pub async fn resolve_assignments(
    state: web::Data<SharedResolverState>,
    req: web::Json<ResolveRequest>,
) -> Result<web::Json<ResolveResponse>, ServiceError> {
    let ResolveRequest { parameters, task } = req.into_inner();
    let work_item = WorkItem::try_from(parameters)?;
    let mut task = task.unwrap_or_default();

    let report = state.resolver.resolve_all(&work_item, &mut task);
    let total = state.record_resolution();

    if let (Some(m), Some(assignments)) =
        (metrics::assignment_metrics(), task.people_assignments.as_ref())
    {
        m.observe(&report, assignments);
    }

    info!(
        message = "Resolved work item",
        parameters = work_item.len(),
        added = report.total_added(),
        duplicates = report.total_duplicates(),
        resolutions = total
    );

    Ok(web::Json(ResolveResponse { task, report }))
}

/// Turn an ID list into entities without touching any task.
#[utoipa::path(
    post,
    path = "/api/v1/entities",
    tag = "assignments",
    request_body = ParseRequest,
    responses((status = 200, body = ParseResponse))
)]
pub async fn parse_entities(
    state: web::Data<SharedResolverState>,
    req: web::Json<ParseRequest>,
) -> web::Json<ParseResponse> {
    let mut entities = EntityList::new();
    let added = entities.extend_from_ids(
        req.ids.as_deref(),
        state.resolver.config().separator,
        req.kind == EntityKind::User,
    );
    debug!(message = "Parsed entities", kind = %req.kind, count = added);
    web::Json(ParseResponse { entities })
}

pub async fn get_metrics(registry: web::Data<Arc<Registry>>) -> Result<HttpResponse, ServiceError> {
    let body = metrics::encode_registry(&registry)
        .map_err(|e| ServiceError::MetricsError(e.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}
