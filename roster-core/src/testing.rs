//! In-memory fakes of the API traits for controller tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use roster_client::{AuthApi, ClientError, ClientResult, DesktopArtifact, ResourceApi};
use shared::client::{AvailableUser, LoginResponse, UserInfo};
use shared::types::EntityId;
use shared::{Employee, EmployeeCreate, Entity, User, UserCreate};

/// Entities the fake backend can materialize from a payload
pub trait FakeEntity: Entity {
    fn from_create(id: EntityId, payload: &Self::Create) -> Self;
}

impl FakeEntity for Employee {
    fn from_create(id: EntityId, payload: &EmployeeCreate) -> Self {
        Employee {
            id,
            name: payload.name.clone(),
            position: payload.position.clone(),
            salary: payload.salary,
            phone: payload.phone.clone(),
            email: payload.email.clone(),
        }
    }
}

impl FakeEntity for User {
    fn from_create(id: EntityId, payload: &UserCreate) -> Self {
        User {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            address: payload.address.clone(),
        }
    }
}

pub fn employee(id: EntityId, name: &str, position: &str, email: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        position: position.to_string(),
        salary: 1_500_000,
        phone: "300 123 4567".to_string(),
        email: email.to_string(),
    }
}

pub fn user(id: EntityId, name: &str, email: &str, phone: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: None,
    }
}

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    ListAux,
    Create,
    Update(EntityId),
    Delete(EntityId),
    Health,
}

struct FakeState<E> {
    items: Vec<E>,
    aux: Vec<String>,
    calls: Vec<Call>,
    fail_next: Option<(u16, String)>,
    next_id: EntityId,
    echo: bool,
}

/// Fake collection backed by a `Vec`
pub struct FakeApi<E: Entity> {
    state: Mutex<FakeState<E>>,
}

impl<E: FakeEntity> FakeApi<E> {
    pub fn new(items: Vec<E>) -> Arc<Self> {
        let next_id = items.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            state: Mutex::new(FakeState {
                items,
                aux: Vec::new(),
                calls: Vec::new(),
                fail_next: None,
                next_id,
                echo: true,
            }),
        })
    }

    pub fn set_aux(&self, aux: Vec<String>) {
        self.state.lock().aux = aux;
    }

    /// Make the next call fail with an API error
    pub fn fail_next(&self, status: u16, message: &str) {
        self.state.lock().fail_next = Some((status, message.to_string()));
    }

    /// Answer create/update with a bare message instead of the entity
    pub fn message_only(&self) {
        self.state.lock().echo = false;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: Call) -> ClientResult<()> {
        let mut state = self.state.lock();
        state.calls.push(call);
        match state.fail_next.take() {
            Some((status, message)) => Err(ClientError::Api { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: FakeEntity> ResourceApi<E> for FakeApi<E> {
    async fn list(&self) -> ClientResult<Vec<E>> {
        self.record(Call::List)?;
        Ok(self.state.lock().items.clone())
    }

    async fn list_aux(&self) -> ClientResult<Vec<String>> {
        self.record(Call::ListAux)?;
        Ok(self.state.lock().aux.clone())
    }

    async fn create(&self, payload: &E::Create) -> ClientResult<Option<E>> {
        self.record(Call::Create)?;
        let mut state = self.state.lock();
        let entity = E::from_create(state.next_id, payload);
        state.next_id += 1;
        state.items.push(entity.clone());
        Ok(state.echo.then_some(entity))
    }

    async fn update(&self, id: EntityId, payload: &E::Create) -> ClientResult<Option<E>> {
        self.record(Call::Update(id))?;
        let mut state = self.state.lock();
        let entity = E::from_create(id, payload);
        match state.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => *slot = entity.clone(),
            None => {
                return Err(ClientError::Api {
                    status: 404,
                    message: "Not Found".into(),
                });
            }
        }
        Ok(state.echo.then_some(entity))
    }

    async fn delete(&self, id: EntityId) -> ClientResult<()> {
        self.record(Call::Delete(id))?;
        self.state.lock().items.retain(|item| item.id() != id);
        Ok(())
    }

    async fn health_check(&self) -> ClientResult<()> {
        self.record(Call::Health)
    }
}

/// Fake auth backend with a fixed set of accounts
pub struct FakeAuth {
    accounts: Vec<(String, String)>,
    logins: Mutex<usize>,
    fail: Mutex<bool>,
}

impl FakeAuth {
    pub fn new(accounts: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            accounts: accounts
                .iter()
                .map(|(email, name)| (email.to_string(), name.to_string()))
                .collect(),
            logins: Mutex::new(0),
            fail: Mutex::new(false),
        })
    }

    /// Answer every request with a 500 from now on
    pub fn go_down(&self) {
        *self.fail.lock() = true;
    }

    pub fn login_calls(&self) -> usize {
        *self.logins.lock()
    }

    fn check_up(&self) -> ClientResult<()> {
        if *self.fail.lock() {
            return Err(ClientError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, email: &str, name: &str) -> ClientResult<LoginResponse> {
        *self.logins.lock() += 1;
        self.check_up()?;
        let found = self
            .accounts
            .iter()
            .any(|(e, n)| e == email && n == name);
        if found {
            Ok(LoginResponse {
                success: true,
                user: Some(UserInfo {
                    name: Some(name.to_string()),
                    email: Some(email.to_string()),
                    role: Some("Admin".into()),
                    ..Default::default()
                }),
                message: None,
            })
        } else {
            Ok(LoginResponse {
                success: false,
                user: None,
                message: Some("User not found".into()),
            })
        }
    }

    async fn available_users(&self) -> ClientResult<Vec<AvailableUser>> {
        self.check_up()?;
        Ok(self
            .accounts
            .iter()
            .map(|(email, name)| AvailableUser {
                email: email.clone(),
                name: name.clone(),
            })
            .collect())
    }

    async fn download_desktop(&self, artifact: DesktopArtifact) -> ClientResult<Vec<u8>> {
        self.check_up()?;
        Ok(artifact.file_name().as_bytes().to_vec())
    }
}
