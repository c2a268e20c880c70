//! Blocking client for the dependency tracker REST API.

use crate::config::ApiConfig;
use crate::error::RequiresError;
use crate::name::Name;
use crate::normalize::ManifestFile;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use std::fs;

/// Remote resources addressed relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Repository(&'a Name),
    Branch(&'a Name, &'a Name),
    Tag(&'a Name, &'a Name),
    Site(&'a Name, &'a Name),
}

impl Resource<'_> {
    pub fn path(&self) -> String {
        match self {
            Resource::Repository(repo) => format!("repos/{repo}"),
            Resource::Branch(repo, name) => format!("repos/{repo}/branches/{name}"),
            Resource::Tag(repo, name) => format!("repos/{repo}/tags/{name}"),
            Resource::Site(repo, name) => format!("repos/{repo}/sites/{name}"),
        }
    }
}

/// One uploaded manifest: its relative URL and base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct RepositorySettings {
    private: bool,
}

pub struct RequiresApi {
    client: Client,
    base_url: String,
}

impl RequiresApi {
    pub fn new(config: ApiConfig) -> Result<Self, RequiresError> {
        let mut authorization = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|err| RequiresError::InvalidHeader(err.to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("requires/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|err| RequiresError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn url(&self, resource: &Resource<'_>) -> String {
        format!("{}{}", self.base_url, resource.path())
    }

    pub fn update_repository(&self, repository: &Name, private: bool) -> Result<(), RequiresError> {
        tracing::info!("update repository {repository} (private: {private})");
        let url = self.url(&Resource::Repository(repository));
        self.send(self.client.put(url).json(&RepositorySettings { private }))
    }

    pub fn delete_repository(&self, repository: &Name) -> Result<(), RequiresError> {
        tracing::info!("delete repository {repository}");
        self.delete(&Resource::Repository(repository))
    }

    pub fn update_branch(
        &self,
        repository: &Name,
        name: &Name,
        manifests: &[ManifestFile],
    ) -> Result<(), RequiresError> {
        tracing::info!("update branch {name} on repository {repository}");
        self.update_reference(&Resource::Branch(repository, name), manifests)
    }

    pub fn delete_branch(&self, repository: &Name, name: &Name) -> Result<(), RequiresError> {
        tracing::info!("delete branch {name} on repository {repository}");
        self.delete(&Resource::Branch(repository, name))
    }

    pub fn update_tag(
        &self,
        repository: &Name,
        name: &Name,
        manifests: &[ManifestFile],
    ) -> Result<(), RequiresError> {
        tracing::info!("update tag {name} on repository {repository}");
        self.update_reference(&Resource::Tag(repository, name), manifests)
    }

    pub fn delete_tag(&self, repository: &Name, name: &Name) -> Result<(), RequiresError> {
        tracing::info!("delete tag {name} on repository {repository}");
        self.delete(&Resource::Tag(repository, name))
    }

    /// Replace the package listing of a site. `listing` is sent as plain text.
    pub fn update_site(
        &self,
        repository: &Name,
        name: &Name,
        listing: &str,
    ) -> Result<(), RequiresError> {
        tracing::info!("update site {name} on repository {repository}");
        let url = self.url(&Resource::Site(repository, name));
        self.send(
            self.client
                .put(url)
                .header(CONTENT_TYPE, "text/plain")
                .body(listing.to_string()),
        )
    }

    pub fn delete_site(&self, repository: &Name, name: &Name) -> Result<(), RequiresError> {
        tracing::info!("delete site {name} on repository {repository}");
        self.delete(&Resource::Site(repository, name))
    }

    /// Upload all manifests of a branch or tag in a single request.
    ///
    /// Every file is read before anything is sent, so a read failure leaves
    /// the remote reference untouched.
    pub fn update_reference(
        &self,
        resource: &Resource<'_>,
        manifests: &[ManifestFile],
    ) -> Result<(), RequiresError> {
        let payload = build_payload(manifests)?;
        self.send(self.client.put(self.url(resource)).json(&payload))
    }

    fn delete(&self, resource: &Resource<'_>) -> Result<(), RequiresError> {
        self.send(self.client.delete(self.url(resource)))
    }

    fn send(&self, request: RequestBuilder) -> Result<(), RequiresError> {
        let response = request
            .send()
            .map_err(|err| RequiresError::Network(err.to_string()))?;
        tracing::debug!(url = %response.url(), status = %response.status(), "response");

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(RequiresError::Status { status, body });
        }
        Ok(())
    }
}

/// Read and encode every manifest.
pub fn build_payload(manifests: &[ManifestFile]) -> Result<Vec<FileEntry>, RequiresError> {
    manifests
        .iter()
        .map(|manifest| {
            tracing::info!("add {} to payload", manifest.relative_url);
            let bytes = fs::read(&manifest.absolute_path).map_err(|source| RequiresError::Io {
                path: manifest.absolute_path.clone(),
                source,
            })?;
            Ok(FileEntry {
                path: manifest.relative_url.clone(),
                content: BASE64_STANDARD.encode(bytes),
            })
        })
        .collect()
}
