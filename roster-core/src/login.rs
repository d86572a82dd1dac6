//! LoginController - system selection, login and desktop downloads

use std::path::{Path, PathBuf};
use std::sync::Arc;

use roster_client::{AuthApi, DesktopArtifact};
use shared::client::AvailableUser;
use shared::types::SystemId;

use crate::error::{DownloadError, StorageResult};
use crate::notify::{Level, Toasts};
use crate::session::SessionStore;

const MISSING_FIELDS: &str = "Please fill in all fields";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const CONNECTION_ERROR: &str = "Connection error. Check that the server is running.";
const DESKTOP_ONLY: &str =
    "The desktop system is not available from the web. Use the desktop application.";

/// Where the login view is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    SelectSystem,
    Credentials,
    /// Logged into the desktop employees system; offer the builds
    DesktopDownload,
}

/// Screens the login view can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    EmployeesPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Stay,
    Redirect(Route),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOptions {
    /// List demo credentials from `/auth/users` on the web login form
    pub show_demo_users: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            show_demo_users: true,
        }
    }
}

pub struct LoginController {
    auth: Arc<dyn AuthApi>,
    store: Arc<SessionStore>,
    options: LoginOptions,
    stage: LoginStage,
    selected: Option<SystemId>,
    demo_users: Vec<AvailableUser>,
    /// Inline message under the form; only the latest is kept
    message: Option<(Level, String)>,
    toasts: Toasts,
}

impl LoginController {
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<SessionStore>, options: LoginOptions) -> Self {
        Self {
            auth,
            store,
            options,
            stage: LoginStage::SelectSystem,
            selected: None,
            demo_users: Vec::new(),
            message: None,
            toasts: Toasts::new(),
        }
    }

    /// Skip the login view when a web session is still valid
    ///
    /// Restores the current user into the process-scoped store.
    pub fn resume(&mut self) -> StorageResult<LoginOutcome> {
        let Some(record) = self.store.load()? else {
            return Ok(LoginOutcome::Stay);
        };
        if !self.store.is_valid(&record, SystemId::EmployeesWeb) {
            tracing::debug!(system = %record.system, "Stored session not usable for auto-login");
            return Ok(LoginOutcome::Stay);
        }
        self.store.set_current_user(&record.user)?;
        tracing::info!(user = %record.user.display_name(), "Resuming stored session");
        Ok(LoginOutcome::Redirect(Route::EmployeesPanel))
    }

    /// Pick a system and show the credential form
    pub async fn select_system(&mut self, system: SystemId) {
        self.selected = Some(system);
        self.stage = LoginStage::Credentials;
        self.message = None;
        self.demo_users.clear();

        if system == SystemId::EmployeesWeb && self.options.show_demo_users {
            match self.auth.available_users().await {
                Ok(users) => self.demo_users = users,
                Err(e) => tracing::debug!(error = %e, "Demo credentials unavailable"),
            }
        }
    }

    pub fn back_to_selector(&mut self) {
        self.selected = None;
        self.stage = LoginStage::SelectSystem;
        self.message = None;
        self.demo_users.clear();
    }

    fn fail(&mut self, text: &str) -> LoginOutcome {
        self.message = Some((Level::Error, text.to_string()));
        self.toasts.error(text);
        LoginOutcome::Stay
    }

    /// Submit the credential form
    ///
    /// Only storage failures are errors; everything else is reported on the
    /// form and yields [`LoginOutcome::Stay`].
    pub async fn login(&mut self, email: &str, name: &str) -> StorageResult<LoginOutcome> {
        let (email, name) = (email.trim(), name.trim());
        if email.is_empty() || name.is_empty() {
            return Ok(self.fail(MISSING_FIELDS));
        }
        let Some(system) = self.selected else {
            return Ok(self.fail("Select a system first"));
        };

        self.message = None;
        let result = self.auth.login(email, name).await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Login request failed");
                return Ok(self.fail(CONNECTION_ERROR));
            }
        };
        if !response.success {
            let text = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| INVALID_CREDENTIALS.to_string());
            tracing::info!(email, "Login rejected");
            return Ok(self.fail(&text));
        }

        let user = response.user.unwrap_or_default();
        self.store.save(&user, system)?;
        self.message = Some((Level::Success, "Login successful".to_string()));

        Ok(match system {
            SystemId::EmployeesWeb => LoginOutcome::Redirect(Route::EmployeesPanel),
            SystemId::EmployeesDesktop => {
                self.stage = LoginStage::DesktopDownload;
                LoginOutcome::Stay
            }
            SystemId::UsersDesktop => self.fail(DESKTOP_ONLY),
        })
    }

    /// Fetch a desktop build into `dir`
    pub async fn download_desktop(
        &mut self,
        artifact: DesktopArtifact,
        dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let bytes = match self.auth.download_desktop(artifact).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.fail(&format!("Download failed: {}", e.user_message()));
                return Err(e.into());
            }
        };

        let path = dir.join(artifact.file_name());
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &bytes).await?;

        let text = format!(
            "Download complete! Run {} to start the application.",
            artifact.file_name()
        );
        self.message = Some((Level::Success, text.clone()));
        self.toasts.success(text);
        Ok(path)
    }

    /// Leave the download options for the web login
    pub async fn use_web_version(&mut self) {
        self.select_system(SystemId::EmployeesWeb).await;
    }

    pub fn logout(&mut self) -> StorageResult<()> {
        self.store.clear()?;
        self.back_to_selector();
        tracing::info!("Logged out");
        Ok(())
    }

    // ── View state ──────────────────────────────────────────────────

    pub fn stage(&self) -> LoginStage {
        self.stage
    }

    pub fn selected(&self) -> Option<SystemId> {
        self.selected
    }

    pub fn demo_users(&self) -> &[AvailableUser] {
        &self.demo_users
    }

    pub fn message(&self) -> Option<(Level, &str)> {
        self.message.as_ref().map(|(level, text)| (*level, text.as_str()))
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAuth;
    use shared::client::UserInfo;
    use tempfile::TempDir;

    fn controller(auth: &Arc<FakeAuth>, store: &Arc<SessionStore>) -> LoginController {
        LoginController::new(auth.clone(), store.clone(), LoginOptions::default())
    }

    #[tokio::test]
    async fn test_web_login_stores_session_and_redirects() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);

        login.select_system(SystemId::EmployeesWeb).await;
        assert_eq!(login.demo_users().len(), 1);

        let outcome = login.login(" ana@super.co ", "Ana").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Redirect(Route::EmployeesPanel));

        let record = store.load().unwrap().unwrap();
        assert_eq!(record.system, "empleados-web");
        assert_eq!(store.current_user().unwrap().unwrap().display_name(), "Ana");
    }

    #[tokio::test]
    async fn test_two_failed_logins_two_notifications_no_session() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);
        login.select_system(SystemId::EmployeesWeb).await;

        assert_eq!(login.login("ana@super.co", "Wrong").await.unwrap(), LoginOutcome::Stay);
        assert_eq!(login.login("ana@super.co", "Wrong").await.unwrap(), LoginOutcome::Stay);

        assert_eq!(login.toasts().len(), 2);
        assert_eq!(login.message(), Some((Level::Error, "User not found")));
        assert!(store.load().unwrap().is_none());
        assert_eq!(auth.login_calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields_skip_the_request() {
        let auth = FakeAuth::new(&[]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);
        login.select_system(SystemId::EmployeesWeb).await;

        login.login("  ", "Ana").await.unwrap();
        assert_eq!(login.message(), Some((Level::Error, MISSING_FIELDS)));
        assert_eq!(auth.login_calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_is_a_connection_error() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);
        login.select_system(SystemId::EmployeesWeb).await;
        auth.go_down();

        login.login("ana@super.co", "Ana").await.unwrap();
        assert_eq!(login.message(), Some((Level::Error, CONNECTION_ERROR)));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_desktop_login_offers_downloads() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);

        login.select_system(SystemId::EmployeesDesktop).await;
        assert!(login.demo_users().is_empty());
        assert_eq!(login.login("ana@super.co", "Ana").await.unwrap(), LoginOutcome::Stay);
        assert_eq!(login.stage(), LoginStage::DesktopDownload);

        let temp_dir = TempDir::new().unwrap();
        let path = login
            .download_desktop(DesktopArtifact::Launcher, temp_dir.path())
            .await
            .unwrap();
        assert!(path.ends_with("launcher.bat"));
        assert_eq!(std::fs::read(&path).unwrap(), b"launcher.bat");

        login.use_web_version().await;
        assert_eq!(login.selected(), Some(SystemId::EmployeesWeb));
        assert_eq!(login.stage(), LoginStage::Credentials);
    }

    #[tokio::test]
    async fn test_users_desktop_is_refused_on_the_web() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = controller(&auth, &store);
        login.select_system(SystemId::UsersDesktop).await;

        assert_eq!(login.login("ana@super.co", "Ana").await.unwrap(), LoginOutcome::Stay);
        assert_eq!(login.message(), Some((Level::Error, DESKTOP_ONLY)));
    }

    #[tokio::test]
    async fn test_resume_only_for_valid_web_session() {
        let auth = FakeAuth::new(&[]);
        let store = Arc::new(SessionStore::in_memory());
        let user = UserInfo {
            name: Some("Ana".into()),
            ..Default::default()
        };

        let mut login = controller(&auth, &store);
        assert_eq!(login.resume().unwrap(), LoginOutcome::Stay);

        store.save(&user, SystemId::EmployeesDesktop).unwrap();
        assert_eq!(login.resume().unwrap(), LoginOutcome::Stay);

        store.save(&user, SystemId::EmployeesWeb).unwrap();
        assert_eq!(
            login.resume().unwrap(),
            LoginOutcome::Redirect(Route::EmployeesPanel)
        );

        login.logout().unwrap();
        assert!(store.load().unwrap().is_none());
        assert_eq!(login.stage(), LoginStage::SelectSystem);
    }

    #[tokio::test]
    async fn test_demo_users_can_be_hidden() {
        let auth = FakeAuth::new(&[("ana@super.co", "Ana")]);
        let store = Arc::new(SessionStore::in_memory());
        let mut login = LoginController::new(
            auth.clone(),
            store,
            LoginOptions {
                show_demo_users: false,
            },
        );
        login.select_system(SystemId::EmployeesWeb).await;
        assert!(login.demo_users().is_empty());
    }
}
