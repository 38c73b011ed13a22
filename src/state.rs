use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::ServiceError;
use crate::resolver::{AssignmentResolver, ResolverConfig};

/// State shared by all workers of the service.
///
/// The resolver only holds configuration, so no lock is needed.
#[derive(Debug)]
pub struct ResolverState {
    pub resolver: AssignmentResolver,
    pub started: DateTime<Utc>,
    resolutions: AtomicU64,
}

impl Default for ResolverState {
    fn default() -> Self {
        Self::with_resolver(AssignmentResolver::default())
    }
}

impl ResolverState {
    pub fn new(config: ResolverConfig) -> Result<Self, ServiceError> {
        Ok(Self::with_resolver(AssignmentResolver::new(config)?))
    }

    pub fn with_resolver(resolver: AssignmentResolver) -> Self {
        Self {
            resolver,
            started: Utc::now(),
            resolutions: AtomicU64::new(0),
        }
    }

    /// Count one handled work item; returns the new total.
    pub fn record_resolution(&self) -> u64 {
        self.resolutions.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn resolutions(&self) -> u64 {
        self.resolutions.load(Ordering::Relaxed)
    }
}

pub type SharedResolverState = Arc<ResolverState>;
