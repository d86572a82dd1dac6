//! DialogController - modal state
//!
//! One slot per modal kind: opening a kind that is already open replaces
//! its content instead of stacking a second modal. The confirmation slot
//! carries the single pending action.

use chrono::{DateTime, Duration, Utc};

use crate::notify::Level;

/// How long success/info messages stay open
pub const MESSAGE_AUTO_DISMISS_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Confirmation,
    Message,
    Edit,
}

/// Pending confirmation and the action to run on accept
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation<A> {
    pub message: String,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    pub level: Level,
    pub title: String,
    pub message: String,
    /// Set for levels that close on their own
    pub dismiss_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    pub title: String,
}

#[derive(Debug)]
pub struct DialogController<A> {
    confirmation: Option<Confirmation<A>>,
    message: Option<MessageDialog>,
    edit: Option<EditDialog>,
}

impl<A> Default for DialogController<A> {
    fn default() -> Self {
        Self {
            confirmation: None,
            message: None,
            edit: None,
        }
    }
}

impl<A> DialogController<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation, replacing any pending request
    pub fn confirm(&mut self, message: impl Into<String>, action: A) {
        if self.confirmation.is_some() {
            tracing::debug!("Replacing pending confirmation");
        }
        self.confirmation = Some(Confirmation {
            message: message.into(),
            action,
        });
    }

    pub fn pending(&self) -> Option<&Confirmation<A>> {
        self.confirmation.as_ref()
    }

    /// Close the confirmation and hand back its action
    pub fn accept(&mut self) -> Option<A> {
        self.confirmation.take().map(|c| c.action)
    }

    pub fn decline(&mut self) {
        self.confirmation = None;
    }

    pub fn show_message(&mut self, level: Level, title: impl Into<String>, message: impl Into<String>) {
        self.show_message_at(level, title, message, Utc::now());
    }

    pub fn show_message_at(
        &mut self,
        level: Level,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let dismiss_at = level
            .auto_dismisses()
            .then(|| now + Duration::seconds(MESSAGE_AUTO_DISMISS_SECS));
        self.message = Some(MessageDialog {
            level,
            title: title.into(),
            message: message.into(),
            dismiss_at,
        });
    }

    pub fn message(&self) -> Option<&MessageDialog> {
        self.message.as_ref()
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Close the message if its auto-dismiss time has passed
    pub fn expire_message(&mut self, now: DateTime<Utc>) {
        let due = self
            .message
            .as_ref()
            .and_then(|m| m.dismiss_at)
            .is_some_and(|at| now >= at);
        if due {
            self.message = None;
        }
    }

    pub fn open_edit(&mut self, title: impl Into<String>) {
        self.edit = Some(EditDialog { title: title.into() });
    }

    pub fn edit(&self) -> Option<&EditDialog> {
        self.edit.as_ref()
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        match kind {
            DialogKind::Confirmation => self.confirmation.is_some(),
            DialogKind::Message => self.message.is_some(),
            DialogKind::Edit => self.edit.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_replaces_pending_action() {
        let mut dialogs = DialogController::new();
        dialogs.confirm("Delete Ana?", 1);
        dialogs.confirm("Delete Luis?", 2);

        assert_eq!(dialogs.pending().unwrap().message, "Delete Luis?");
        assert_eq!(dialogs.accept(), Some(2));
        assert_eq!(dialogs.accept(), None);
        assert!(!dialogs.is_open(DialogKind::Confirmation));
    }

    #[test]
    fn test_decline_drops_action() {
        let mut dialogs = DialogController::new();
        dialogs.confirm("Delete?", "x");
        dialogs.decline();
        assert_eq!(dialogs.accept(), None);
    }

    #[test]
    fn test_message_auto_dismiss_by_level() {
        let mut dialogs = DialogController::<()>::new();
        let now = Utc::now();

        dialogs.show_message_at(Level::Success, "Done", "Saved", now);
        dialogs.expire_message(now + Duration::seconds(2));
        assert!(dialogs.is_open(DialogKind::Message));
        dialogs.expire_message(now + Duration::seconds(MESSAGE_AUTO_DISMISS_SECS));
        assert!(!dialogs.is_open(DialogKind::Message));

        dialogs.show_message_at(Level::Error, "Error", "Failed", now);
        dialogs.expire_message(now + Duration::hours(1));
        assert_eq!(dialogs.message().unwrap().message, "Failed");
    }

    #[test]
    fn test_one_modal_per_kind() {
        let mut dialogs = DialogController::<()>::new();
        dialogs.open_edit("Edit user");
        dialogs.open_edit("New user");
        assert_eq!(dialogs.edit().unwrap().title, "New user");

        dialogs.show_message(Level::Warning, "Careful", "first");
        dialogs.show_message(Level::Info, "Note", "second");
        assert_eq!(dialogs.message().unwrap().message, "second");

        dialogs.close_edit();
        assert!(!dialogs.is_open(DialogKind::Edit));
        assert!(dialogs.is_open(DialogKind::Message));
    }
}
