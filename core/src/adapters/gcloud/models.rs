//! Response models for gcloud and kubectl JSON output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// gcloud config configurations list
// ============================================================================

/// One entry of `gcloud config configurations list --format json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcloudConfiguration {
    pub name: String,
    #[serde(default)]
    pub properties: ConfigurationProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationProperties {
    #[serde(default)]
    pub core: CoreProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreProperties {
    pub account: Option<String>,
    pub project: Option<String>,
}

impl GcloudConfiguration {
    pub fn project(&self) -> Option<&str> {
        self.properties.core.project.as_deref().filter(|p| !p.is_empty())
    }

    pub fn account(&self) -> Option<&str> {
        self.properties.core.account.as_deref()
    }
}

// ============================================================================
// gcloud container clusters list
// ============================================================================

/// One entry of `gcloud container clusters list --format json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GkeCluster {
    pub name: String,
    /// Region or zone; older gcloud versions only populate `zone`.
    pub location: Option<String>,
    pub zone: Option<String>,
    pub endpoint: Option<String>,
    pub master_auth: Option<MasterAuth>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterAuth {
    pub cluster_ca_certificate: Option<String>,
}

impl GkeCluster {
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().or(self.zone.as_deref())
    }

    /// Base64 CA certificate, as kubeconfig expects it.
    pub fn ca_certificate(&self) -> Option<&str> {
        self.master_auth
            .as_ref()
            .and_then(|a| a.cluster_ca_certificate.as_deref())
            .filter(|c| !c.is_empty())
    }
}

// ============================================================================
// kubectl get namespaces
// ============================================================================

/// Response structure for `kubectl get namespaces -o json`.
#[derive(Debug, Deserialize)]
pub struct NamespaceListResponse {
    pub items: Vec<NamespaceItem>,
}

#[derive(Debug, Deserialize)]
pub struct NamespaceItem {
    pub metadata: NamespaceMetadata,
}

#[derive(Debug, Deserialize)]
pub struct NamespaceMetadata {
    pub name: String,
}

impl NamespaceListResponse {
    /// Converts the kubectl response to a list of namespace names.
    pub fn into_names(self) -> Vec<String> {
        self.items.into_iter().map(|item| item.metadata.name).collect()
    }
}

// ============================================================================
// Kubeconfig
// ============================================================================

/// Minimal single-cluster kubeconfig used to list namespaces.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion")]
    pub api_version: &'static str,
    pub kind: &'static str,
    pub clusters: Vec<NamedEntry<KubeCluster>>,
    pub users: Vec<NamedEntry<KubeUser>>,
    pub contexts: Vec<NamedEntry<KubeContext>>,
    pub current_context: String,
    pub preferences: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct NamedEntry<T> {
    pub name: String,
    #[serde(flatten)]
    pub value: T,
}

#[derive(Debug, Serialize)]
pub struct KubeCluster {
    pub cluster: ClusterEndpoint,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEndpoint {
    pub server: String,
    pub certificate_authority_data: String,
}

#[derive(Debug, Serialize)]
pub struct KubeUser {
    pub user: UserToken,
}

#[derive(Debug, Serialize)]
pub struct UserToken {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct KubeContext {
    pub context: ContextRef,
}

#[derive(Debug, Serialize)]
pub struct ContextRef {
    pub cluster: String,
    pub user: String,
}

impl Kubeconfig {
    /// Builds a kubeconfig whose only context points at `endpoint` with a bearer token.
    pub fn single(name: &str, endpoint: &str, ca_data: &str, token: &str) -> Self {
        Self {
            api_version: "v1",
            kind: "Config",
            clusters: vec![NamedEntry {
                name: name.to_string(),
                value: KubeCluster {
                    cluster: ClusterEndpoint {
                        server: format!("https://{}", endpoint),
                        certificate_authority_data: ca_data.to_string(),
                    },
                },
            }],
            users: vec![NamedEntry {
                name: name.to_string(),
                value: KubeUser {
                    user: UserToken {
                        token: token.to_string(),
                    },
                },
            }],
            contexts: vec![NamedEntry {
                name: name.to_string(),
                value: KubeContext {
                    context: ContextRef {
                        cluster: name.to_string(),
                        user: name.to_string(),
                    },
                },
            }],
            current_context: name.to_string(),
            preferences: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configurations() {
        let json = r#"[
            {"name": "prod", "isActive": true,
             "properties": {"core": {"account": "me@example.com", "project": "prod-123"}}},
            {"name": "empty", "isActive": false, "properties": {}}
        ]"#;
        let configs: Vec<GcloudConfiguration> = serde_json::from_str(json).unwrap();
        assert_eq!(configs[0].project(), Some("prod-123"));
        assert_eq!(configs[0].account(), Some("me@example.com"));
        assert_eq!(configs[1].project(), None);
    }

    #[test]
    fn test_parse_clusters() {
        let json = r#"[
            {"name": "web", "location": "us-central1", "zone": "us-central1",
             "endpoint": "10.0.0.1", "masterAuth": {"clusterCaCertificate": "Q0E="}},
            {"name": "old", "zone": "europe-west1-b", "endpoint": "10.0.0.2"}
        ]"#;
        let clusters: Vec<GkeCluster> = serde_json::from_str(json).unwrap();
        assert_eq!(clusters[0].location(), Some("us-central1"));
        assert_eq!(clusters[0].ca_certificate(), Some("Q0E="));
        assert_eq!(clusters[1].location(), Some("europe-west1-b"));
        assert_eq!(clusters[1].ca_certificate(), None);
    }

    #[test]
    fn test_parse_namespaces() {
        let json = r#"{"items": [
            {"metadata": {"name": "default"}},
            {"metadata": {"name": "payments"}}
        ]}"#;
        let response: NamespaceListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_names(), vec!["default", "payments"]);
    }

    #[test]
    fn test_kubeconfig_shape() {
        let config = Kubeconfig::single("gke_p_us-east1_c", "1.2.3.4", "Q0E=", "tok");
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("current-context: gke_p_us-east1_c"));
        assert!(yaml.contains("server: https://1.2.3.4"));
        assert!(yaml.contains("certificate-authority-data: Q0E="));
        assert!(yaml.contains("token: tok"));
    }
}
