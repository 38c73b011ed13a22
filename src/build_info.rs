use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::OnceLock;

use crate::models::VersionResponse;

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub crate_name: &'static str,
    pub crate_version: &'static str,
    pub version: String,
    pub git: GitInfo,
    pub rustc_semver: Option<&'static str>,
    pub target_triple: Option<&'static str>,
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GitInfo {
    pub describe: Option<&'static str>,
    pub sha: Option<&'static str>,
    pub dirty: bool,
}

static CELL: OnceLock<BuildInfo> = OnceLock::new();

pub fn build_info() -> &'static BuildInfo {
    CELL.get_or_init(|| {
        let pkg_ver = env!("CARGO_PKG_VERSION");

        // Builds outside a git checkout get placeholder values from vergen.
        let describe = option_env!("VERGEN_GIT_DESCRIBE").filter(|s| is_real(s));
        let sha = option_env!("VERGEN_GIT_SHA").filter(|s| is_real(s));
        let dirty = option_env!("VERGEN_GIT_DIRTY") == Some("true");

        BuildInfo {
            crate_name: env!("CARGO_PKG_NAME"),
            crate_version: pkg_ver,
            version: human_version(pkg_ver, describe, dirty),
            git: GitInfo {
                describe,
                sha,
                dirty,
            },
            rustc_semver: option_env!("VERGEN_RUSTC_SEMVER"),
            target_triple: option_env!("VERGEN_CARGO_TARGET_TRIPLE"),
            built_at: option_env!("VERGEN_BUILD_TIMESTAMP").and_then(parse_build_timestamp),
        }
    })
}

impl From<&BuildInfo> for VersionResponse {
    fn from(info: &BuildInfo) -> Self {
        VersionResponse {
            version: info.version.clone(),
            git_sha: info.git.sha.map(str::to_string),
            rustc: info.rustc_semver.map(str::to_string),
            target: info.target_triple.map(str::to_string),
            built_at: info.built_at,
        }
    }
}

fn is_real(value: &str) -> bool {
    !value.is_empty() && value != "VERGEN_IDEMPOTENT_OUTPUT"
}

/// vergen writes the build time as RFC 3339.
fn parse_build_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Version string for humans: `v0.0.1` on a release tag, `v0.0.1+3.gabc1234`
/// past it, with `-dirty` appended for modified trees.
pub fn human_version(pkg_ver: &str, describe: Option<&str>, dirty: bool) -> String {
    let suffix = if dirty { "-dirty" } else { "" };
    let Some(describe) = describe else {
        return format!("v{pkg_ver}{suffix}");
    };
    let describe = describe.strip_suffix("-dirty").unwrap_or(describe);

    // "<tag>-<distance>-g<sha>", where the tag itself may contain hyphens.
    let mut parts = describe.rsplitn(3, '-');
    if let (Some(sha), Some(distance), Some(tag)) = (parts.next(), parts.next(), parts.next()) {
        if distance.parse::<u64>().is_ok() && sha.starts_with('g') && sha.len() > 7 {
            return format!("{tag}+{distance}.{sha}{suffix}");
        }
    }

    if describe.trim_start_matches('v') == pkg_ver {
        return format!("v{pkg_ver}{suffix}");
    }

    // A bare sha when no tag is reachable.
    if describe.len() >= 7 && describe.chars().all(|c| c.is_ascii_hexdigit()) {
        return format!("v{pkg_ver}+g{describe}{suffix}");
    }

    format!("{describe}{suffix}")
}
