//! Roster Core - controllers behind the admin panels
//!
//! Session persistence and the auth gate, field validation, the list /
//! form / dialog controllers, the login screen, and the two panels that
//! compose them. Rendering is left to the front-end: every command returns
//! a typed result and the controllers expose their state for drawing.

pub mod dialog;
pub mod error;
pub mod form;
pub mod gate;
pub mod list;
pub mod login;
pub mod notify;
pub mod panel;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use dialog::{Confirmation, DialogController, DialogKind, EditDialog, MessageDialog};
pub use error::{DownloadError, FormError, StorageError, StorageResult};
pub use form::{EmployeeForm, EntityForm, FormController, SubmitKind, Submitted, UserForm};
pub use gate::{AuthGate, GateDecision, HeaderInfo};
pub use list::{FilterState, ListController, Mutated, TableState, apply_filter};
pub use login::{LoginController, LoginOptions, LoginOutcome, LoginStage, Route};
pub use notify::{Level, Toast, Toasts};
pub use panel::{ApiStatus, EmployeesPanel, Feedback, FormLayout, Panel, PanelAction, PanelOptions, UsersPanel};
pub use session::{SessionRecord, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use validation::FieldErrors;
