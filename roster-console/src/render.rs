//! Plain-text rendering of the controller state

use std::fmt::Write;

use roster_core::{
    ApiStatus, EntityForm, Level, LoginController, LoginStage, Panel, TableState, Toast,
};
use shared::types::SystemId;
use shared::util::{format_thousands, initials};
use shared::{Employee, User};

/// One table row per entity kind
pub trait Row {
    fn header() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl Row for Employee {
    fn header() -> &'static [&'static str] {
        &["ID", "Name", "Position", "Salary", "Phone", "Email"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.position.clone(),
            format!("${}", format_thousands(self.salary)),
            self.phone.clone(),
            self.email.clone(),
        ]
    }
}

impl Row for User {
    fn header() -> &'static [&'static str] {
        &["ID", "", "Name", "Email", "Phone", "Address"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            initials(&self.name),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(header.to_vec()));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str).collect()));
    }
    out
}

pub fn toasts(items: &[Toast]) -> String {
    let mut out = String::new();
    for toast in items {
        let tag = match toast.level {
            Level::Success => "ok",
            Level::Error => "error",
            Level::Warning => "warn",
            Level::Info => "info",
        };
        let _ = writeln!(out, "[{tag}] {}", toast.message);
    }
    out
}

pub fn login(login: &LoginController) -> String {
    let mut out = String::new();
    match login.stage() {
        LoginStage::SelectSystem => {
            let _ = writeln!(out, "Select a system (select <id>):");
            for system in SystemId::ALL {
                let _ = writeln!(out, "  {:<18} {}", system.as_str(), system.label());
            }
        }
        LoginStage::Credentials => {
            if let Some(system) = login.selected() {
                let _ = writeln!(out, "Login to {} (login <email> <name>, back)", system.label());
            }
            if !login.demo_users().is_empty() {
                let _ = writeln!(out, "Demo credentials:");
                for user in login.demo_users() {
                    let _ = writeln!(out, "  {} / {}", user.email, user.name);
                }
            }
        }
        LoginStage::DesktopDownload => {
            let _ = writeln!(out, "Desktop application:");
            let _ = writeln!(out, "  download jar       executable JAR");
            let _ = writeln!(out, "  download launcher  launcher script");
            let _ = writeln!(out, "  web                use the web version instead");
        }
    }
    if let Some((level, text)) = login.message() {
        let tag = if level == Level::Error { "!" } else { "*" };
        let _ = writeln!(out, "{tag} {text}");
    }
    out
}

pub fn panel<F>(title: &str, panel: &Panel<F>) -> String
where
    F: EntityForm,
    F::Entity: Row,
{
    let mut out = String::new();

    let status = match panel.api_status() {
        ApiStatus::Online => "API connected",
        ApiStatus::Offline => "API disconnected",
        ApiStatus::Unknown => "API status unknown",
    };
    let _ = write!(out, "== {title} == [{status}]");
    if let Some(header) = panel.header() {
        let _ = write!(out, "  {} ({})", header.display_name, header.role);
    }
    out.push('\n');

    let list = panel.list();
    let filter = list.filter();
    if !filter.is_empty() {
        let _ = writeln!(
            out,
            "Filter: \"{}\"{}",
            filter.search_term.trim(),
            filter
                .category
                .as_deref()
                .map(|c| format!(" in {c}"))
                .unwrap_or_default()
        );
    }
    if !list.categories().is_empty() {
        let _ = writeln!(out, "Categories: {}", list.categories().join(", "));
    }

    match list.table_state() {
        TableState::Idle => {}
        TableState::Empty => out.push_str("No records yet\n"),
        TableState::NoMatches => out.push_str("No results for the current filters\n"),
        TableState::Failed(message) => {
            let _ = writeln!(out, "Could not load records: {message}");
        }
        TableState::Ready => {
            let rows: Vec<Vec<String>> = list.visible().iter().map(|e| e.cells()).collect();
            out.push_str(&table(<F::Entity as Row>::header(), &rows));
            let _ = writeln!(out, "{} of {} shown", rows.len(), list.items().len());
        }
    }

    if panel.form_visible() {
        out.push_str(&form(panel));
    }
    if let Some(pending) = panel.dialogs().pending() {
        let _ = writeln!(out, "? {} (yes/no)", pending.message);
    }
    if let Some(message) = panel.dialogs().message() {
        let _ = writeln!(out, "{}: {}", message.title, message.message);
    }
    out
}

fn form<F: EntityForm>(panel: &Panel<F>) -> String {
    let controller = panel.form();
    let mut out = String::new();

    let title = panel
        .dialogs()
        .edit()
        .map(|dialog| dialog.title.clone())
        .unwrap_or_else(|| controller.submit_label());
    let _ = writeln!(out, "-- {title} --");
    for field in F::FIELDS {
        let value = controller.form().field(field).unwrap_or_default();
        let _ = write!(out, "  {field:<9} {value}");
        if let Some(error) = controller.errors().get(field) {
            let _ = write!(out, "   <- {error}");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "  (set <field> <value>, save = {}, cancel)", controller.submit_label());
    out
}
