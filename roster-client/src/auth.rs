//! Auth API used by the login screen

use async_trait::async_trait;
use shared::client::{AvailableUser, LoginRequest, LoginResponse};

use crate::{ClientResult, HttpClient, NetworkHttpClient};

/// Desktop build offered after logging into a desktop system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopArtifact {
    /// Self-contained executable JAR
    Jar,
    /// Script that fetches and starts the desktop application
    Launcher,
}

impl DesktopArtifact {
    /// Endpoint path, relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            DesktopArtifact::Jar => "desktop/download",
            DesktopArtifact::Launcher => "desktop/launcher",
        }
    }

    /// Suggested file name for the download
    pub fn file_name(&self) -> &'static str {
        match self {
            DesktopArtifact::Jar => "SupermercadoMVC-Desktop.jar",
            DesktopArtifact::Launcher => "launcher.bat",
        }
    }
}

/// Auth endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`; a rejected login is `Ok` with `success == false`
    async fn login(&self, email: &str, name: &str) -> ClientResult<LoginResponse>;
    /// `GET /auth/users`
    async fn available_users(&self) -> ClientResult<Vec<AvailableUser>>;
    /// Download a desktop build
    async fn download_desktop(&self, artifact: DesktopArtifact) -> ClientResult<Vec<u8>>;
}

/// Auth client over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct AuthClient<H = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> AuthClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }
}

#[async_trait]
impl<H: HttpClient> AuthApi for AuthClient<H> {
    async fn login(&self, email: &str, name: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            name: name.to_string(),
        };
        let response: LoginResponse = self.http.post("auth/login", &request).await?;
        tracing::debug!(email = %email, success = response.success, "Login answered");
        Ok(response)
    }

    async fn available_users(&self) -> ClientResult<Vec<AvailableUser>> {
        self.http.get("auth/users").await
    }

    async fn download_desktop(&self, artifact: DesktopArtifact) -> ClientResult<Vec<u8>> {
        let bytes = self.http.get_bytes(artifact.path()).await?;
        tracing::info!(artifact = artifact.file_name(), size = bytes.len(), "Desktop build downloaded");
        Ok(bytes)
    }
}
