use std::sync::{Arc, OnceLock};

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGaugeVec, Registry,
    TextEncoder,
};

use crate::assignments::{PeopleAssignments, Role};
use crate::build_info::build_info;
use crate::entity::EntityKind;
use crate::resolver::ResolutionReport;

pub struct HttpMetrics {
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
}

impl HttpMetrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = IntCounterVec::new(
            prometheus::Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "path", "status_code"],
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            ),
            &["method", "path", "status_code"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
        })
    }

    pub fn observe(&self, method: &str, path: &str, status_code: u16, duration_secs: f64) {
        let status = status_code.to_string();
        let labels: [&str; 3] = [method, path, &status];
        self.requests_total.with_label_values(&labels).inc();
        self.request_duration_seconds
            .with_label_values(&labels)
            .observe(duration_secs);
    }
}

/// Counters for resolved work items.
pub struct AssignmentMetrics {
    resolutions_total: IntCounter,
    entities_assigned_total: IntCounterVec,
    duplicates_skipped_total: IntCounterVec,
}

impl AssignmentMetrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let resolutions_total = IntCounter::new(
            "assignment_resolutions_total",
            "Total number of resolved work items",
        )?;
        let entities_assigned_total = IntCounterVec::new(
            prometheus::Opts::new(
                "assignment_entities_assigned_total",
                "Entities appended to task role lists",
            ),
            &["role", "kind"],
        )?;
        let duplicates_skipped_total = IntCounterVec::new(
            prometheus::Opts::new(
                "assignment_duplicates_skipped_total",
                "IDs skipped because the role list already held them",
            ),
            &["role"],
        )?;

        registry.register(Box::new(resolutions_total.clone()))?;
        registry.register(Box::new(entities_assigned_total.clone()))?;
        registry.register(Box::new(duplicates_skipped_total.clone()))?;

        Ok(Self {
            resolutions_total,
            entities_assigned_total,
            duplicates_skipped_total,
        })
    }

    /// Record a resolution. `after` is the record the report was produced for.
    ///
    /// Kinds are split using the tail of each list, where the entities added
    /// by this resolution sit.
    pub fn observe(&self, report: &ResolutionReport, after: &PeopleAssignments) {
        self.resolutions_total.inc();
        for role in Role::ALL {
            let added = report.added.get(&role).copied().unwrap_or(0);
            if added > 0 {
                let list = after.list(role);
                let start = list.len().saturating_sub(added);
                for entity in list.iter().skip(start) {
                    self.entities_assigned_total
                        .with_label_values(&[role.as_str(), entity.kind().as_str()])
                        .inc();
                }
            }
            let duplicates = report.duplicates.get(&role).copied().unwrap_or(0);
            if duplicates > 0 {
                self.duplicates_skipped_total
                    .with_label_values(&[role.as_str()])
                    .inc_by(duplicates as u64);
            }
        }
    }

    pub fn assigned(&self, role: Role, kind: EntityKind) -> u64 {
        self.entities_assigned_total
            .with_label_values(&[role.as_str(), kind.as_str()])
            .get()
    }

    pub fn resolutions(&self) -> u64 {
        self.resolutions_total.get()
    }
}

/// Registry and the metric handles registered in it, installed once per process.
struct Installed {
    registry: Arc<Registry>,
    http: Arc<HttpMetrics>,
    assignments: Arc<AssignmentMetrics>,
}

static INSTALLED: OnceLock<Installed> = OnceLock::new();

/// HTTP metrics, if [`init_prometheus`] has run.
pub fn http_metrics() -> Option<Arc<HttpMetrics>> {
    INSTALLED.get().map(|m| m.http.clone())
}

/// Assignment metrics, if [`init_prometheus`] has run.
pub fn assignment_metrics() -> Option<Arc<AssignmentMetrics>> {
    INSTALLED.get().map(|m| m.assignments.clone())
}

/// Build and register Prometheus metrics and expose build info.
///
/// The registry is process-wide: later calls return the one built first, so
/// the counters behind [`http_metrics`] and [`assignment_metrics`] are always
/// the ones it exposes.
pub fn init_prometheus() -> Result<Arc<Registry>, prometheus::Error> {
    if let Some(installed) = INSTALLED.get() {
        return Ok(installed.registry.clone());
    }

    let registry = Registry::new();

    // Static build info metric (value = 1), labeled with versions.
    let build = build_info();
    let build_gauge = IntGaugeVec::new(
        prometheus::Opts::new("people_assign_build_info", "Build and toolchain versions"),
        &["app_version", "rustc_version"],
    )?;
    registry.register(Box::new(build_gauge.clone()))?;
    build_gauge
        .with_label_values(&[build.version.as_str(), build.rustc_semver.unwrap_or("unknown")])
        .set(1);

    let http = Arc::new(HttpMetrics::new(&registry)?);
    let assignments = Arc::new(AssignmentMetrics::new(&registry)?);

    // A concurrent caller may have installed first; its set is the live one.
    let installed = INSTALLED.get_or_init(|| Installed {
        registry: Arc::new(registry),
        http,
        assignments,
    });
    Ok(installed.registry.clone())
}

/// Encode all metrics from the provided registry in Prometheus text format.
pub fn encode_registry(registry: &Registry) -> Result<Vec<u8>, prometheus::Error> {
    let metric_families = registry.gather();
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    encoder.encode(&metric_families, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::OrganizationalEntity;

    #[test]
    fn assignment_metrics_split_by_kind() {
        let registry = Registry::new();
        let metrics = AssignmentMetrics::new(&registry).unwrap();

        let mut after = PeopleAssignments::default();
        after.assign(Role::PotentialOwners, OrganizationalEntity::user("old"));
        after.assign(Role::PotentialOwners, OrganizationalEntity::user("john"));
        after.assign(Role::PotentialOwners, OrganizationalEntity::group("ops"));

        let mut report = ResolutionReport::default();
        report.added.insert(Role::PotentialOwners, 2);
        report.duplicates.insert(Role::PotentialOwners, 1);

        metrics.observe(&report, &after);
        assert_eq!(metrics.resolutions(), 1);
        assert_eq!(metrics.assigned(Role::PotentialOwners, EntityKind::User), 1);
        assert_eq!(metrics.assigned(Role::PotentialOwners, EntityKind::Group), 1);

        let text = String::from_utf8(encode_registry(&registry).unwrap()).unwrap();
        assert!(text.contains("assignment_duplicates_skipped_total{role=\"potential_owners\"} 1"));
    }
}
