//! Screen state and command dispatch

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use roster_client::{AuthClient, DesktopArtifact, ResourceClient};
use roster_core::{
    AuthGate, EmployeesPanel, EntityForm, FileStore, FormError, LoginController, LoginOptions,
    LoginOutcome, MemoryStore, Panel, Route, SessionStore, UsersPanel,
};
use shared::types::{EntityId, SystemId};
use shared::{Employee, User};

use crate::config::Config;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Employees,
    Users,
}

/// Whether the command loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
Screens:   employees | users | login | logout | quit
Login:     select <system> | back | login <email> <name> | download jar|launcher | web
Panels:    refresh | status | search <text> | category <name>|all | clear
           new | edit <id> | set <field> <value> | save | cancel
           delete <id> | yes | no | dismiss";

pub struct App {
    config: Config,
    login: LoginController,
    employees: EmployeesPanel,
    users: UsersPanel,
    screen: Screen,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(SessionStore::new(
            Arc::new(FileStore::new(config.session_dir())),
            Arc::new(MemoryStore::new()),
        ));

        let api_http = config.api_client().build_http_client()?;
        let users_http = config.users_client().build_http_client()?;

        let login = LoginController::new(
            Arc::new(AuthClient::new(api_http.clone())),
            store.clone(),
            LoginOptions {
                show_demo_users: config.show_demo_users,
            },
        );
        let employees = EmployeesPanel::employees(
            Arc::new(ResourceClient::<Employee>::new(api_http)),
            AuthGate::new(store, SystemId::EmployeesWeb),
        );
        let users = UsersPanel::users(Arc::new(ResourceClient::<User>::new(users_http)));

        Ok(Self {
            config,
            login,
            employees,
            users,
            screen: Screen::Login,
        })
    }

    /// Auto-login from a stored session, then draw the first screen
    pub async fn start(&mut self) -> Result<()> {
        if self.login.resume()? == LoginOutcome::Redirect(Route::EmployeesPanel) {
            self.open_employees().await?;
        }
        self.draw();
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn draw(&mut self) {
        let now = Utc::now();
        let (body, toasts) = match self.screen {
            Screen::Login => (
                render::login(&self.login),
                self.login.toasts_mut().drain(),
            ),
            Screen::Employees => {
                self.employees.dialogs_mut().expire_message(now);
                (
                    render::panel("Employees", &self.employees),
                    self.employees.toasts_mut().drain(),
                )
            }
            Screen::Users => {
                self.users.dialogs_mut().expire_message(now);
                (
                    render::panel("Users", &self.users),
                    self.users.toasts_mut().drain(),
                )
            }
        };
        print!("{}", render::toasts(&toasts));
        print!("{body}");
    }

    async fn open_employees(&mut self) -> Result<()> {
        if self.employees.open().await? {
            self.screen = Screen::Employees;
        } else {
            self.screen = Screen::Login;
            self.login.back_to_selector();
        }
        Ok(())
    }

    async fn open_users(&mut self) -> Result<()> {
        self.users.open().await?;
        self.screen = Screen::Users;
        Ok(())
    }

    /// Run one command line
    pub async fn handle(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            "employees" => self.open_employees().await?,
            "users" => self.open_users().await?,
            "login" if self.screen != Screen::Login || rest.is_empty() => {
                self.screen = Screen::Login;
            }
            "logout" => {
                self.login.logout()?;
                self.screen = Screen::Login;
            }
            _ => match self.screen {
                Screen::Login => self.handle_login(command, rest).await?,
                Screen::Employees => handle_panel(&mut self.employees, command, rest).await,
                Screen::Users => handle_panel(&mut self.users, command, rest).await,
            },
        }

        self.draw();
        Ok(Flow::Continue)
    }

    async fn handle_login(&mut self, command: &str, rest: &str) -> Result<()> {
        match command {
            "select" => match rest.parse::<SystemId>() {
                Ok(system) => self.login.select_system(system).await,
                Err(_) => println!("Unknown system: {rest}"),
            },
            "back" => self.login.back_to_selector(),
            "login" => {
                let (email, name) = rest.split_once(' ').unwrap_or((rest, ""));
                if self.login.login(email, name).await? == LoginOutcome::Redirect(Route::EmployeesPanel) {
                    self.open_employees().await?;
                }
            }
            "download" => {
                let artifact = match rest {
                    "jar" => DesktopArtifact::Jar,
                    "launcher" => DesktopArtifact::Launcher,
                    _ => {
                        println!("Usage: download jar|launcher");
                        return Ok(());
                    }
                };
                let dir = self.config.downloads_dir();
                if let Ok(path) = self.login.download_desktop(artifact, &dir).await {
                    println!("Saved to {}", path.display());
                }
            }
            "web" => self.login.use_web_version().await,
            other => println!("Unknown command: {other} (try help)"),
        }
        Ok(())
    }
}

fn parse_id(rest: &str) -> Option<EntityId> {
    let id = rest.parse().ok();
    if id.is_none() {
        println!("Expected a numeric id");
    }
    id
}

async fn handle_panel<F: EntityForm>(panel: &mut Panel<F>, command: &str, rest: &str) {
    match command {
        "refresh" | "list" => {
            let _ = panel.refresh().await;
        }
        "status" => {
            panel.check_api_status().await;
        }
        "search" => panel.search(rest),
        "category" => {
            let category = (rest != "all").then(|| rest.to_string());
            panel.filter_category(category);
        }
        "clear" => panel.clear_search(),
        "new" => panel.new_entry(),
        "edit" => {
            if let Some(id) = parse_id(rest) {
                let _ = panel.edit(id);
            }
        }
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            if let Err(FormError::UnknownField(field)) = panel.set_field(field, value) {
                println!("Unknown field: {field} (fields: {})", F::FIELDS.join(", "));
            }
        }
        "save" => {
            let _ = panel.submit().await;
        }
        "cancel" => panel.cancel_edit(),
        "delete" => {
            if let Some(id) = parse_id(rest) {
                let _ = panel.request_delete(id);
            }
        }
        "yes" => {
            let _ = panel.accept().await;
        }
        "no" => panel.decline(),
        "dismiss" => panel.dialogs_mut().dismiss_message(),
        other => println!("Unknown command: {other} (try help)"),
    }
}
