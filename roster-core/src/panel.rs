//! Panel - one admin screen for one entity kind
//!
//! Composes the list, form and dialog controllers with toasts and the API
//! status indicator. Every command updates the screen state and returns a
//! typed result; backend failures are also surfaced as toasts.

use std::sync::Arc;

use roster_client::{ClientError, ClientResult, ResourceApi};
use shared::types::EntityId;
use shared::{Employee, Entity, User};

use crate::dialog::DialogController;
use crate::error::{FormError, StorageResult};
use crate::form::{EmployeeForm, EntityForm, FormController, SubmitKind, Submitted, UserForm};
use crate::gate::{AuthGate, GateDecision, HeaderInfo};
use crate::list::ListController;
use crate::notify::{Level, Toasts};

/// Action held by the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Delete(EntityId),
}

/// Backend reachability as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Where the entity form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// Always visible next to the table
    Inline,
    /// In the edit dialog, opened by new/edit
    Dialog,
}

/// Where command outcomes are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Toasts,
    /// The message dialog; success/info close on their own
    MessageDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOptions {
    pub layout: FormLayout,
    pub feedback: Feedback,
    /// Refresh also clears the search box
    pub clear_search_on_refresh: bool,
}

impl PanelOptions {
    pub fn employees() -> Self {
        Self {
            layout: FormLayout::Inline,
            feedback: Feedback::MessageDialog,
            clear_search_on_refresh: false,
        }
    }

    pub fn users() -> Self {
        Self {
            layout: FormLayout::Dialog,
            feedback: Feedback::Toasts,
            clear_search_on_refresh: true,
        }
    }
}

pub type EmployeesPanel = Panel<EmployeeForm>;
pub type UsersPanel = Panel<UserForm>;

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct Panel<F: EntityForm> {
    gate: Option<AuthGate>,
    header: Option<HeaderInfo>,
    list: ListController<F::Entity>,
    form: FormController<F>,
    dialogs: DialogController<PanelAction>,
    toasts: Toasts,
    api_status: ApiStatus,
    options: PanelOptions,
}

impl EmployeesPanel {
    /// Employees screen, behind the `empleados-web` gate
    pub fn employees(api: Arc<dyn ResourceApi<Employee>>, gate: AuthGate) -> Self {
        Panel::new(api, PanelOptions::employees()).with_gate(gate)
    }
}

impl UsersPanel {
    /// Users screen; not gated
    pub fn users(api: Arc<dyn ResourceApi<User>>) -> Self {
        Panel::new(api, PanelOptions::users())
    }
}

impl<F: EntityForm> Panel<F> {
    pub fn new(api: Arc<dyn ResourceApi<F::Entity>>, options: PanelOptions) -> Self {
        Self {
            gate: None,
            header: None,
            list: ListController::new(api),
            form: FormController::new(),
            dialogs: DialogController::new(),
            toasts: Toasts::new(),
            api_status: ApiStatus::Unknown,
            options,
        }
    }

    pub fn with_gate(mut self, gate: AuthGate) -> Self {
        self.gate = Some(gate);
        self
    }

    fn label() -> &'static str {
        <F::Entity as Entity>::LABEL
    }

    /// Enter the screen
    ///
    /// Returns `false` when the gate refuses entry; nothing is loaded then
    /// and the caller goes to the login view.
    pub async fn open(&mut self) -> StorageResult<bool> {
        if let Some(gate) = &self.gate {
            match gate.check()? {
                GateDecision::Proceed(header) => self.header = Some(header),
                GateDecision::RedirectToLogin => {
                    self.header = None;
                    return Ok(false);
                }
            }
        }

        self.check_api_status().await;
        // Failure is already on screen as a toast and the table state
        let _ = self.refresh().await;
        self.list.load_categories().await;
        Ok(true)
    }

    pub async fn check_api_status(&mut self) -> ApiStatus {
        self.api_status = match self.list.api().health_check().await {
            Ok(()) => ApiStatus::Online,
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                ApiStatus::Offline
            }
        };
        self.api_status
    }

    fn notify(&mut self, level: Level, message: String) {
        match self.options.feedback {
            Feedback::Toasts => {
                self.toasts.push(level, level.title(), message);
            }
            Feedback::MessageDialog => {
                tracing::debug!(?level, %message, "Panel message");
                self.dialogs.show_message(level, level.title(), message);
            }
        }
    }

    /// Apply the outcome of a `load()`
    ///
    /// The form may only keep editing an id that is in the loaded set.
    fn record_load(&mut self, result: &ClientResult<usize>) {
        match result {
            Ok(_) => self.api_status = ApiStatus::Online,
            Err(e) => {
                self.api_status = ApiStatus::Offline;
                let message = format!("Could not load {}s: {}", Self::label(), e.user_message());
                self.notify(Level::Error, message);
            }
        }

        if let Some(id) = self.form.editing_id() {
            if self.list.find(id).is_none() {
                tracing::debug!(id, "Edited entity no longer loaded, leaving edit mode");
                self.cancel_edit();
            }
        }
    }

    /// Reload the collection
    pub async fn refresh(&mut self) -> ClientResult<usize> {
        if self.options.clear_search_on_refresh {
            self.list.clear_search();
        }
        let result = self.list.load().await;
        self.record_load(&result);
        result
    }

    pub fn search(&mut self, term: &str) {
        self.list.set_search(term);
    }

    pub fn filter_category(&mut self, category: Option<String>) {
        self.list.set_category(category);
    }

    pub fn clear_search(&mut self) {
        self.list.clear_search();
    }

    /// Empty form in create mode
    pub fn new_entry(&mut self) {
        self.form.reset();
        if self.options.layout == FormLayout::Dialog {
            self.dialogs.open_edit(format!("New {}", Self::label()));
        }
    }

    /// Load an entity from the cache into the form
    pub fn edit(&mut self, id: EntityId) -> Result<(), FormError> {
        let Some(entity) = self.list.find(id) else {
            self.notify(Level::Error, format!("{} not found", capitalized(Self::label())));
            return Err(FormError::NotFound(id));
        };
        self.form.start_edit(entity);
        if self.options.layout == FormLayout::Dialog {
            self.dialogs.open_edit(format!("Edit {}", Self::label()));
        }
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.form.set_field(field, value)
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
        self.dialogs.close_edit();
    }

    pub async fn submit(&mut self) -> Result<Submitted<F::Entity>, FormError> {
        match self.form.submit(&mut self.list).await {
            Ok(done) => {
                let verb = match done.kind {
                    SubmitKind::Created => "created",
                    SubmitKind::Updated => "updated",
                };
                let message = format!("{} {verb} successfully", capitalized(Self::label()));
                self.notify(Level::Success, message);
                self.record_load(&done.reload);
                self.dialogs.close_edit();
                Ok(done)
            }
            Err(FormError::Client(e)) => {
                self.report_failure("save", &e);
                Err(FormError::Client(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Ask before deleting
    pub fn request_delete(&mut self, id: EntityId) -> Result<(), FormError> {
        let Some(entity) = self.list.find(id) else {
            self.notify(Level::Error, format!("{} not found", capitalized(Self::label())));
            return Err(FormError::NotFound(id));
        };
        let message = format!(
            "Are you sure you want to delete {} \"{}\"?",
            Self::label(),
            entity.display_name()
        );
        self.dialogs.confirm(message, PanelAction::Delete(id));
        Ok(())
    }

    /// Run the pending action, if any
    pub async fn accept(&mut self) -> Result<Option<PanelAction>, FormError> {
        let Some(action) = self.dialogs.accept() else {
            return Ok(None);
        };
        match action {
            PanelAction::Delete(id) => match self.list.delete(id).await {
                Ok(done) => {
                    let message = format!("{} deleted successfully", capitalized(Self::label()));
                    self.notify(Level::Success, message);
                    // Also leaves edit mode when the deleted entity was being edited
                    self.record_load(&done.reload);
                    Ok(Some(action))
                }
                Err(e) => {
                    self.report_failure("delete", &e);
                    Err(FormError::Client(e))
                }
            },
        }
    }

    pub fn decline(&mut self) {
        self.dialogs.decline();
    }

    fn report_failure(&mut self, verb: &str, error: &ClientError) {
        if error.is_network() {
            self.api_status = ApiStatus::Offline;
        }
        let message = format!("Could not {verb} {}: {}", Self::label(), error.user_message());
        self.notify(Level::Error, message);
    }

    // ── Screen state ────────────────────────────────────────────────

    pub fn header(&self) -> Option<&HeaderInfo> {
        self.header.as_ref()
    }

    pub fn list(&self) -> &ListController<F::Entity> {
        &self.list
    }

    pub fn form(&self) -> &FormController<F> {
        &self.form
    }

    pub fn dialogs(&self) -> &DialogController<PanelAction> {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut DialogController<PanelAction> {
        &mut self.dialogs
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn api_status(&self) -> ApiStatus {
        self.api_status
    }

    pub fn options(&self) -> PanelOptions {
        self.options
    }

    /// Whether the form should be drawn
    pub fn form_visible(&self) -> bool {
        match self.options.layout {
            FormLayout::Inline => true,
            FormLayout::Dialog => self.dialogs.edit().is_some(),
        }
    }
}
