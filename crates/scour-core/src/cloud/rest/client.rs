use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cloud::errors::CloudError;
use crate::cloud::rest::auth::{self, TokenData};
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::config::types::AuthConfig;

/// Catalog service types, as registered by a stock deployment.
const COMPUTE: &str = "compute";
const VOLUME: &str = "volumev3";
const NETWORK: &str = "network";
const IMAGE: &str = "image";
const OBJECT_STORE: &str = "object-store";

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// A [`CloudSession`] over plain REST, bound to one project-scoped token.
pub struct RestSession {
    http: Client,
    auth: AuthConfig,
    token: TokenData,
}

impl RestSession {
    /// Authenticate with the configured credentials and project scope.
    pub fn connect(auth: AuthConfig) -> Result<Self, CloudError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CloudError::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let token = auth::issue_token(&http, &auth, None)?;
        Ok(Self { http, auth, token })
    }

    /// Re-authenticate with the same credentials, scoped to another project.
    ///
    /// Used after the operator's own session resolved the purge target: the
    /// sweep itself runs through a session whose listings are scoped to the
    /// project being purged.
    pub fn rescope(&self, project_id: &str) -> Result<RestSession, CloudError> {
        info!(event = "core.cloud.rescope", project_id = project_id);
        let token = auth::issue_token(&self.http, &self.auth, Some(project_id))?;
        Ok(RestSession {
            http: self.http.clone(),
            auth: self.auth.clone(),
            token,
        })
    }

    fn service_url(&self, service: &str, path: &str) -> Result<String, CloudError> {
        Ok(format!("{}{}", self.token.endpoint(service)?, path))
    }

    fn identity_url(&self, path: &str) -> String {
        format!("{}{}", auth::identity_base(&self.auth.auth_url), path)
    }

    fn check(&self, response: Response, what: &str) -> Result<Response, CloudError> {
        let status = response.status();
        match status.as_u16() {
            404 => Err(CloudError::NotFound {
                what: what.to_string(),
            }),
            401 | 403 => Err(CloudError::Unauthorized {
                message: format!("{}: {}", what, response.text().unwrap_or_default()),
            }),
            _ if status.is_success() => Ok(response),
            code => Err(CloudError::Api {
                status: code,
                message: format!("{}: {}", what, response.text().unwrap_or_default()),
            }),
        }
    }

    fn get_json(&self, url: &str, what: &str) -> Result<Value, CloudError> {
        debug!(event = "core.cloud.get", url = url);
        let response = self
            .http
            .get(url)
            .header("X-Auth-Token", &self.token.token)
            .send()?;
        Ok(self.check(response, what)?.json()?)
    }

    fn delete_url(&self, url: &str, what: &str) -> Result<(), CloudError> {
        debug!(event = "core.cloud.delete", url = url);
        let response = self
            .http
            .delete(url)
            .header("X-Auth-Token", &self.token.token)
            .send()?;
        self.check(response, what).map(|_| ())
    }

    fn put_json(&self, url: &str, body: Value, what: &str) -> Result<(), CloudError> {
        let response = self
            .http
            .put(url)
            .header("X-Auth-Token", &self.token.token)
            .json(&body)
            .send()?;
        self.check(response, what).map(|_| ())
    }

    /// List a JSON collection nested under `key` in the response body.
    fn list_collection(
        &self,
        service: &str,
        path: &str,
        key: &str,
    ) -> Result<Vec<Resource>, CloudError> {
        let url = self.service_url(service, path)?;
        let mut body = self.get_json(&url, key)?;
        collect_resources(body[key].take(), key)
    }

    /// Object storage listings are bare JSON arrays, not keyed objects.
    fn list_storage(&self, path: &str, what: &str) -> Result<Vec<Resource>, CloudError> {
        let url = format!("{}{}?format=json", self.token.endpoint(OBJECT_STORE)?, path);
        let body = self.get_json(&url, what)?;
        collect_resources(body, what)
    }

    /// Resolve a role name to its id through the identity service.
    fn find_role_id(&self, role: &str) -> Result<String, CloudError> {
        let url = self.identity_url(&format!("/roles?name={}", role));
        let body = self.get_json(&url, "roles")?;
        body["roles"][0]["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CloudError::NotFound {
                what: format!("role '{}'", role),
            })
    }

    fn role_assignment_url(&self, user_id: &str, project_id: &str, role_id: &str) -> String {
        self.identity_url(&format!(
            "/projects/{}/users/{}/roles/{}",
            project_id, user_id, role_id
        ))
    }
}

/// Convert a JSON array into resource records, rejecting non-object items.
fn collect_resources(value: Value, what: &str) -> Result<Vec<Resource>, CloudError> {
    let Value::Array(items) = value else {
        return Err(CloudError::Decode {
            message: format!("expected a JSON array for '{}'", what),
        });
    };

    items
        .into_iter()
        .map(|item| {
            Resource::from_value(item).ok_or_else(|| CloudError::Decode {
                message: format!("non-object entry in '{}' listing", what),
            })
        })
        .collect()
}

impl CloudSession for RestSession {
    fn current_project_id(&self) -> Result<String, CloudError> {
        Ok(self.token.project_id.clone())
    }

    fn current_user_id(&self) -> Result<String, CloudError> {
        Ok(self.token.user_id.clone())
    }

    fn find_project(&self, name_or_id: &str) -> Result<Option<Resource>, CloudError> {
        // Try as an id first, then fall back to a name filter.
        let by_id = self.identity_url(&format!("/projects/{}", name_or_id));
        match self.get_json(&by_id, "project") {
            Ok(body) => return Ok(Resource::from_value(body["project"].clone())),
            Err(CloudError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let by_name = self.identity_url(&format!("/projects?name={}", name_or_id));
        let mut body = self.get_json(&by_name, "projects")?;
        Ok(Resource::from_value(body["projects"][0].take()))
    }

    fn grant_role(
        &self,
        user_id: &str,
        project_id: &str,
        role: &str,
    ) -> Result<bool, CloudError> {
        let role_id = self.find_role_id(role)?;
        let url = self.role_assignment_url(user_id, project_id, &role_id);

        // HEAD returns 204 when the assignment already exists.
        let response = self
            .http
            .head(&url)
            .header("X-Auth-Token", &self.token.token)
            .send()?;
        if response.status().is_success() {
            return Ok(false);
        }

        self.put_json(&url, json!({}), "role assignment")?;
        info!(
            event = "core.cloud.role_granted",
            user_id = user_id,
            project_id = project_id,
            role = role
        );
        Ok(true)
    }

    fn revoke_role(&self, user_id: &str, project_id: &str, role: &str) -> Result<(), CloudError> {
        let role_id = self.find_role_id(role)?;
        let url = self.role_assignment_url(user_id, project_id, &role_id);
        self.delete_url(&url, "role assignment")
    }

    fn list_servers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(COMPUTE, "/servers/detail", "servers")
    }

    fn delete_server(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(COMPUTE, &format!("/servers/{}", id))?;
        self.delete_url(&url, &format!("server '{}'", id))
    }

    fn list_volume_snapshots(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(VOLUME, "/snapshots/detail", "snapshots")
    }

    fn delete_volume_snapshot(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(VOLUME, &format!("/snapshots/{}", id))?;
        self.delete_url(&url, &format!("snapshot '{}'", id))
    }

    fn list_volumes(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(VOLUME, "/volumes/detail", "volumes")
    }

    fn delete_volume(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(VOLUME, &format!("/volumes/{}", id))?;
        self.delete_url(&url, &format!("volume '{}'", id))
    }

    fn list_floating_ips(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(NETWORK, "/v2.0/floatingips", "floatingips")
    }

    fn delete_floating_ip(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(NETWORK, &format!("/v2.0/floatingips/{}", id))?;
        self.delete_url(&url, &format!("floating ip '{}'", id))
    }

    fn list_ports(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(NETWORK, "/v2.0/ports", "ports")
    }

    fn delete_port(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(NETWORK, &format!("/v2.0/ports/{}", id))?;
        self.delete_url(&url, &format!("port '{}'", id))
    }

    fn remove_router_interface(&self, router_id: &str, port_id: &str) -> Result<(), CloudError> {
        let url = self.service_url(
            NETWORK,
            &format!("/v2.0/routers/{}/remove_router_interface", router_id),
        )?;
        self.put_json(
            &url,
            json!({ "port_id": port_id }),
            &format!("router interface '{}'", port_id),
        )
    }

    fn list_routers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(NETWORK, "/v2.0/routers", "routers")
    }

    fn delete_router(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(NETWORK, &format!("/v2.0/routers/{}", id))?;
        self.delete_url(&url, &format!("router '{}'", id))
    }

    fn list_networks(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(NETWORK, "/v2.0/networks", "networks")
    }

    fn delete_network(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(NETWORK, &format!("/v2.0/networks/{}", id))?;
        self.delete_url(&url, &format!("network '{}'", id))
    }

    fn list_security_groups(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(NETWORK, "/v2.0/security-groups", "security_groups")
    }

    fn delete_security_group(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(NETWORK, &format!("/v2.0/security-groups/{}", id))?;
        self.delete_url(&url, &format!("security group '{}'", id))
    }

    fn list_images(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_collection(IMAGE, "/v2/images", "images")
    }

    fn delete_image(&self, id: &str) -> Result<(), CloudError> {
        let url = self.service_url(IMAGE, &format!("/v2/images/{}", id))?;
        self.delete_url(&url, &format!("image '{}'", id))
    }

    fn list_containers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list_storage("", "containers")
    }

    fn list_objects(&self, container: &str) -> Result<Vec<Resource>, CloudError> {
        self.list_storage(&format!("/{}", container), "objects")
    }

    fn delete_object(&self, container: &str, name: &str) -> Result<(), CloudError> {
        let url = format!(
            "{}/{}/{}",
            self.token.endpoint(OBJECT_STORE)?,
            container,
            name
        );
        self.delete_url(&url, &format!("object '{}/{}'", container, name))
    }

    fn delete_container(&self, name: &str) -> Result<(), CloudError> {
        let url = format!("{}/{}", self.token.endpoint(OBJECT_STORE)?, name);
        self.delete_url(&url, &format!("container '{}'", name))
    }
}
