use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use job_portal::board::applications::DiskResumeStore;
use job_portal::board::identity::{Argon2Passwords, TokenIssuer};
use job_portal::board::store::Repositories;
use job_portal::config::{AppConfig, BootstrapAdmin};
use job_portal::error::AppError;
use job_portal::http::PortalState;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire repositories, resume storage and services from configuration.
pub(crate) fn build_portal(config: &AppConfig) -> Result<PortalState, AppError> {
    let resumes = DiskResumeStore::new(&config.storage.upload_dir);
    resumes.ensure_layout()?;

    let tokens = TokenIssuer::new(&config.auth.token_secret, config.auth.token_ttl_hours)?;
    Ok(PortalState::new(
        Repositories::in_memory(),
        Arc::new(resumes),
        Argon2Passwords::default(),
        tokens,
        config.storage.max_upload_bytes,
    ))
}

/// Create the configured administrator if it does not exist yet.
pub(crate) fn bootstrap_admin(
    portal: &PortalState,
    admin: Option<&BootstrapAdmin>,
) -> Result<(), AppError> {
    let Some(admin) = admin else {
        return Ok(());
    };

    let created = portal
        .accounts
        .ensure_admin(&admin.name, &admin.email, &admin.password)?;
    if !created {
        info!(email = %admin.email, "bootstrap administrator already present");
    }
    Ok(())
}

pub(crate) fn check() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    build_portal(&config)?;
    println!(
        "configuration ok: {:?} on {}:{}, uploads in {}",
        config.environment,
        config.server.host,
        config.server.port,
        config.storage.upload_dir.display()
    );
    Ok(())
}
