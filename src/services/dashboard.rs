//! Dashboard summary aggregated from the four resource collections.

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resource::ResourceKind;
use crate::services::backend::BackendClient;
use crate::services::resources;

/// Counts shown on the overview page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub clusters: usize,
    pub nodes: NodeSummary,
    pub providers: ProviderSummary,
    pub license_keys: LicenseKeySummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub count: usize,
    #[serde(rename = "type")]
    pub types: NodeTypeCounts,
    pub state: NodeStateCounts,
}

/// Nodes per service type. Unknown types are not tallied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeTypeCounts {
    pub ldap: usize,
    pub oxauth: usize,
    pub oxtrust: usize,
    pub httpd: usize,
}

/// Nodes per deployment state. Unknown states are not tallied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeStateCounts {
    #[serde(rename = "SUCCESS")]
    pub success: usize,
    #[serde(rename = "IN_PROGRESS")]
    pub in_progress: usize,
    #[serde(rename = "FAILED")]
    pub failed: usize,
    #[serde(rename = "DISABLED")]
    pub disabled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub count: usize,
    #[serde(rename = "type")]
    pub types: ProviderTypeCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderTypeCounts {
    pub master: usize,
    pub consumer: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseKeySummary {
    pub count: usize,
    #[serde(rename = "type")]
    pub types: LicenseValidityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseValidityCounts {
    pub valid: usize,
    pub invalid: usize,
}

/// Fetch all four collections concurrently and summarize them.
///
/// The first failing fetch aborts the whole summary.
pub async fn compute_summary(backend: &BackendClient) -> Result<DashboardSummary, AppError> {
    let (clusters, nodes, providers, license_keys) = tokio::try_join!(
        resources::list(backend, ResourceKind::Clusters),
        resources::list(backend, ResourceKind::Nodes),
        resources::list(backend, ResourceKind::Providers),
        resources::list(backend, ResourceKind::LicenseKeys),
    )?;

    Ok(summarize(&clusters, &nodes, &providers, &license_keys))
}

/// Tally already-fetched collections.
pub fn summarize(
    clusters: &[Value],
    nodes: &[Value],
    providers: &[Value],
    license_keys: &[Value],
) -> DashboardSummary {
    let mut summary = DashboardSummary {
        clusters: clusters.len(),
        ..Default::default()
    };

    summary.nodes.count = nodes.len();
    for node in nodes {
        match str_field(node, "type") {
            Some("ldap") => summary.nodes.types.ldap += 1,
            Some("oxauth") => summary.nodes.types.oxauth += 1,
            Some("oxtrust") => summary.nodes.types.oxtrust += 1,
            Some("httpd") => summary.nodes.types.httpd += 1,
            _ => {}
        }
        match str_field(node, "state") {
            Some("SUCCESS") => summary.nodes.state.success += 1,
            Some("IN_PROGRESS") => summary.nodes.state.in_progress += 1,
            Some("FAILED") => summary.nodes.state.failed += 1,
            Some("DISABLED") => summary.nodes.state.disabled += 1,
            _ => {}
        }
    }

    summary.providers.count = providers.len();
    for provider in providers {
        match str_field(provider, "type") {
            Some("master") => summary.providers.types.master += 1,
            Some("consumer") => summary.providers.types.consumer += 1,
            _ => {}
        }
    }

    summary.license_keys.count = license_keys.len();
    for key in license_keys {
        if key.get("valid").and_then(Value::as_bool).unwrap_or(false) {
            summary.license_keys.types.valid += 1;
        } else {
            summary.license_keys.types.invalid += 1;
        }
    }

    summary
}

fn str_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field).and_then(Value::as_str)
}
