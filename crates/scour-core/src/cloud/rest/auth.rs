//! Keystone v3 password authentication and service catalog parsing.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::cloud::errors::CloudError;
use crate::config::types::AuthConfig;

/// An issued token plus everything the catalog told us about the cloud.
#[derive(Debug, Clone)]
pub struct TokenData {
    pub token: String,
    pub project_id: String,
    pub user_id: String,
    endpoints: HashMap<String, String>,
}

impl TokenData {
    /// Public endpoint URL for a catalog service type (e.g. "compute").
    pub fn endpoint(&self, service: &str) -> Result<&str, CloudError> {
        self.endpoints
            .get(service)
            .map(String::as_str)
            .ok_or_else(|| CloudError::MissingEndpoint {
                service: service.to_string(),
            })
    }
}

/// Normalize an identity URL so it always carries the /v3 suffix.
pub fn identity_base(auth_url: &str) -> String {
    let trimmed = auth_url.trim_end_matches('/');
    if trimmed.ends_with("/v3") {
        trimmed.to_string()
    } else {
        format!("{}/v3", trimmed)
    }
}

/// Issue a project-scoped token.
///
/// When `project_id` is given the token is scoped to that exact project
/// (used to rescope onto a purge target); otherwise the scope comes from
/// the configured project name.
pub fn issue_token(
    http: &Client,
    auth: &AuthConfig,
    project_id: Option<&str>,
) -> Result<TokenData, CloudError> {
    let scope = match project_id {
        Some(id) => json!({ "project": { "id": id } }),
        None => json!({
            "project": {
                "name": auth.project_name,
                "domain": { "name": auth.project_domain }
            }
        }),
    };

    let body = json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": auth.username,
                        "domain": { "name": auth.user_domain },
                        "password": auth.password
                    }
                }
            },
            "scope": scope
        }
    });

    let url = format!("{}/auth/tokens", identity_base(&auth.auth_url));
    let response = http.post(&url).json(&body).send()?;

    let status = response.status();
    if status.as_u16() == 401 || status.as_u16() == 403 {
        return Err(CloudError::Unauthorized {
            message: response.text().unwrap_or_default(),
        });
    }
    if !status.is_success() {
        return Err(CloudError::Api {
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        });
    }

    let token = response
        .headers()
        .get("x-subject-token")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CloudError::Decode {
            message: "token response missing x-subject-token header".to_string(),
        })?
        .to_string();

    let payload: Value = response.json()?;
    let token_body = &payload["token"];

    let project_id = token_body["project"]["id"]
        .as_str()
        .ok_or_else(|| CloudError::Decode {
            message: "token response missing project id".to_string(),
        })?
        .to_string();
    let user_id = token_body["user"]["id"]
        .as_str()
        .ok_or_else(|| CloudError::Decode {
            message: "token response missing user id".to_string(),
        })?
        .to_string();

    let endpoints = parse_catalog(&token_body["catalog"], auth.region.as_deref());

    info!(
        event = "core.cloud.token_issued",
        project_id = %project_id,
        services = endpoints.len()
    );

    Ok(TokenData {
        token,
        project_id,
        user_id,
        endpoints,
    })
}

/// Pick one public endpoint per service type from the token catalog.
fn parse_catalog(catalog: &Value, region: Option<&str>) -> HashMap<String, String> {
    let mut endpoints = HashMap::new();
    let Some(services) = catalog.as_array() else {
        return endpoints;
    };

    for service in services {
        let Some(service_type) = service["type"].as_str() else {
            continue;
        };
        let Some(entries) = service["endpoints"].as_array() else {
            continue;
        };

        for entry in entries {
            if entry["interface"].as_str() != Some("public") {
                continue;
            }
            if let Some(wanted) = region {
                if entry["region"].as_str() != Some(wanted) {
                    continue;
                }
            }
            if let Some(url) = entry["url"].as_str() {
                endpoints.insert(service_type.to_string(), url.trim_end_matches('/').to_string());
                break;
            }
        }
    }

    endpoints
}
