//! Resource types proxied to the API server.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;

/// Collections exposed by the API server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Nodes,
    Providers,
    Clusters,
    LicenseKeys,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Nodes,
        ResourceKind::Providers,
        ResourceKind::Clusters,
        ResourceKind::LicenseKeys,
    ];

    /// Path segment used both by this gateway and by the API server.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Nodes => "nodes",
            ResourceKind::Providers => "providers",
            ResourceKind::Clusters => "clusters",
            ResourceKind::LicenseKeys => "license_keys",
        }
    }

    /// Only providers and license keys accept updates through the gateway.
    pub fn is_updatable(self) -> bool {
        matches!(self, ResourceKind::Providers | ResourceKind::LicenseKeys)
    }

    /// Node creation returns a deploy log reference that is worth keeping.
    pub fn records_deploy_log(self) -> bool {
        matches!(self, ResourceKind::Nodes)
    }

    /// Backend path for a single item.
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{id}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown resource type: {s}")))
    }
}
