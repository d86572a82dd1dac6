//! FormController - edit buffer, validation and submission for one entity
//!
//! Field values are kept as the raw text typed by the user; the typed
//! payload is only built once every field passes validation.

use std::fmt::Debug;

use roster_client::ClientResult;
use shared::types::EntityId;
use shared::{Employee, EmployeeCreate, Entity, User, UserCreate};

use crate::error::FormError;
use crate::list::ListController;
use crate::validation::{self, FieldErrors};

/// Raw field buffer for one entity kind
pub trait EntityForm: Default + Clone + Debug + Send + Sync + 'static {
    type Entity: Entity;

    /// Field names, in display order
    const FIELDS: &'static [&'static str];

    /// Check one field; `None` if the field does not exist
    fn check_field(&self, field: &str) -> Option<Result<(), String>>;

    /// Typed payload from already-validated fields
    fn build(&self) -> Result<<Self::Entity as Entity>::Create, FieldErrors>;

    /// Buffer pre-filled from an existing entity
    fn from_entity(entity: &Self::Entity) -> Self;

    fn field(&self, field: &str) -> Option<&str>;

    /// Returns `false` if the field does not exist
    fn set_field(&mut self, field: &str, value: &str) -> bool;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for &field in Self::FIELDS {
            if let Some(result) = self.check_field(field) {
                errors.check(field, result);
            }
        }
        errors
    }

    /// Validate, then build the payload
    fn to_payload(&self) -> Result<<Self::Entity as Entity>::Create, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.build()
    }
}

// =============================================================================
// Employee form
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub position: String,
    pub salary: String,
    pub phone: String,
    pub email: String,
}

impl EntityForm for EmployeeForm {
    type Entity = Employee;

    const FIELDS: &'static [&'static str] = &["name", "position", "salary", "phone", "email"];

    fn check_field(&self, field: &str) -> Option<Result<(), String>> {
        let result = match field {
            "name" => validation::employee_name(&self.name),
            "position" => validation::position(&self.position),
            "salary" => validation::salary(&self.salary),
            "phone" => validation::employee_phone(&self.phone),
            "email" => validation::email(&self.email),
            _ => return None,
        };
        Some(result)
    }

    fn build(&self) -> Result<EmployeeCreate, FieldErrors> {
        let salary = validation::parse_salary(&self.salary)
            .map_err(|message| FieldErrors::single("salary", message))?;
        Ok(EmployeeCreate {
            name: self.name.trim().to_string(),
            position: self.position.trim().to_string(),
            salary,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        })
    }

    fn from_entity(entity: &Employee) -> Self {
        Self {
            name: entity.name.clone(),
            position: entity.position.clone(),
            salary: entity.salary.to_string(),
            phone: entity.phone.clone(),
            email: entity.email.clone(),
        }
    }

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "position" => Some(&self.position),
            "salary" => Some(&self.salary),
            "phone" => Some(&self.phone),
            "email" => Some(&self.email),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "position" => &mut self.position,
            "salary" => &mut self.salary,
            "phone" => &mut self.phone,
            "email" => &mut self.email,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

// =============================================================================
// User form
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Optional; blank means absent
    pub address: String,
}

impl EntityForm for UserForm {
    type Entity = User;

    const FIELDS: &'static [&'static str] = &["name", "email", "phone", "address"];

    fn check_field(&self, field: &str) -> Option<Result<(), String>> {
        let result = match field {
            "name" => validation::user_name(&self.name),
            "email" => validation::email(&self.email),
            "phone" => validation::user_phone(&self.phone),
            "address" => Ok(()),
            _ => return None,
        };
        Some(result)
    }

    fn build(&self) -> Result<UserCreate, FieldErrors> {
        let address = self.address.trim();
        Ok(UserCreate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: (!address.is_empty()).then(|| address.to_string()),
        })
    }

    fn from_entity(entity: &User) -> Self {
        Self {
            name: entity.name.clone(),
            email: entity.email.clone(),
            phone: entity.phone.clone(),
            address: entity.address.clone().unwrap_or_default(),
        }
    }

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "address" => Some(&self.address),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
}

/// Successful submission
#[derive(Debug)]
pub struct Submitted<E> {
    pub kind: SubmitKind,
    /// The saved entity, when the backend echoed it
    pub entity: Option<E>,
    /// Outcome of the refresh that followed the mutation
    pub reload: ClientResult<usize>,
}

/// Form state for one entity kind
#[derive(Debug, Default)]
pub struct FormController<F: EntityForm> {
    form: F,
    editing_id: Option<EntityId>,
    errors: FieldErrors,
}

impl<F: EntityForm> FormController<F> {
    pub fn new() -> Self {
        Self {
            form: F::default(),
            editing_id: None,
            errors: FieldErrors::new(),
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn editing_id(&self) -> Option<EntityId> {
        self.editing_id
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_label(&self) -> String {
        let verb = if self.editing_id.is_some() { "Update" } else { "Create" };
        format!("{verb} {}", <F::Entity as Entity>::LABEL)
    }

    /// Load `entity` into the form for editing
    pub fn start_edit(&mut self, entity: &F::Entity) {
        self.form = F::from_entity(entity);
        self.editing_id = Some(entity.id());
        self.errors.clear();
        tracing::debug!(collection = <F::Entity as Entity>::COLLECTION, id = entity.id(), "Editing");
    }

    /// Empty form, create mode
    pub fn reset(&mut self) {
        self.form = F::default();
        self.editing_id = None;
        self.errors.clear();
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Update one field; a field already showing an error is re-checked
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        if !self.form.set_field(field, value) {
            return Err(FormError::UnknownField(field.to_string()));
        }
        if self.errors.get(field).is_some() {
            self.validate_field(field)?;
        }
        Ok(())
    }

    /// Check one field and record the outcome
    pub fn validate_field(&mut self, field: &str) -> Result<(), FormError> {
        let Some(&name) = F::FIELDS.iter().find(|f| **f == field) else {
            return Err(FormError::UnknownField(field.to_string()));
        };
        if let Some(result) = self.form.check_field(name) {
            self.errors.check(name, result);
        }
        Ok(())
    }

    /// Validate, then create or update through `list`
    ///
    /// Nothing is sent when validation fails. On success the form is reset
    /// and the list reloaded; on a backend failure the values stay in place.
    pub async fn submit(
        &mut self,
        list: &mut ListController<F::Entity>,
    ) -> Result<Submitted<F::Entity>, FormError> {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!(count = errors.len(), "Form has invalid fields");
                self.errors = errors.clone();
                return Err(FormError::Validation(errors));
            }
        };
        self.errors.clear();

        let result = match self.editing_id {
            Some(id) => list
                .update(id, &payload)
                .await
                .map(|done| (SubmitKind::Updated, done)),
            None => list
                .create(&payload)
                .await
                .map(|done| (SubmitKind::Created, done)),
        };

        let (kind, done) = result?;
        self.reset();
        Ok(Submitted {
            kind,
            entity: done.value,
            reload: done.reload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, employee, user};

    fn filled_employee_form() -> FormController<EmployeeForm> {
        let mut form = FormController::<EmployeeForm>::new();
        form.set_field("name", "  Ana Gómez ").unwrap();
        form.set_field("position", "Cajero").unwrap();
        form.set_field("salary", "1500000").unwrap();
        form.set_field("phone", "+57 300 123 4567").unwrap();
        form.set_field("email", "Ana@Super.CO").unwrap();
        form
    }

    #[tokio::test]
    async fn test_create_issues_one_create_and_one_list() {
        let api = FakeApi::<Employee>::new(Vec::new());
        let mut list = ListController::new(api.clone());
        let mut form = filled_employee_form();

        let done = form.submit(&mut list).await.unwrap();
        assert_eq!(done.kind, SubmitKind::Created);
        let entity = done.entity.unwrap();
        assert_eq!(entity.name, "Ana Gómez");
        assert_eq!(entity.email, "ana@super.co");
        assert_eq!(done.reload.unwrap(), 1);

        assert_eq!(api.calls(), vec![Call::Create, Call::List]);
        assert_eq!(form.form(), &EmployeeForm::default());
        assert_eq!(form.editing_id(), None);
        assert_eq!(list.items().len(), 1);
    }

    #[tokio::test]
    async fn test_message_only_backend_still_counts_as_saved() {
        let api = FakeApi::<Employee>::new(Vec::new());
        api.message_only();
        let mut list = ListController::new(api.clone());

        let mut form = filled_employee_form();
        let created = form.submit(&mut list).await.unwrap();
        assert_eq!(created.kind, SubmitKind::Created);
        assert!(created.entity.is_none());
        assert_eq!(created.reload.unwrap(), 1);
        assert_eq!(form.editing_id(), None);

        form.start_edit(&list.items()[0].clone());
        form.set_field("position", "Gerente").unwrap();
        let updated = form.submit(&mut list).await.unwrap();
        assert_eq!(updated.kind, SubmitKind::Updated);
        assert!(updated.entity.is_none());
        assert_eq!(list.items()[0].position, "Gerente");
        assert_eq!(form.form(), &EmployeeForm::default());

        assert_eq!(
            api.calls(),
            vec![Call::Create, Call::List, Call::Update(1), Call::List]
        );
    }

    #[tokio::test]
    async fn test_empty_name_sends_nothing() {
        let api = FakeApi::new(vec![employee(4, "Luis Pérez", "Gerente", "luis@super.co")]);
        let mut list = ListController::new(api.clone());
        let mut form = FormController::<EmployeeForm>::new();
        form.start_edit(&list_entity(&api).await);
        form.set_field("name", "").unwrap();
        api.clear_calls();

        let err = form.submit(&mut list).await.unwrap_err();
        match err {
            FormError::Validation(errors) => assert_eq!(errors.get("name"), Some("Name is required")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(api.calls().is_empty());
        assert_eq!(form.editing_id(), Some(4));
        assert!(form.errors().get("name").is_some());
    }

    async fn list_entity(api: &FakeApi<Employee>) -> Employee {
        use roster_client::ResourceApi;
        api.list().await.unwrap().remove(0)
    }

    #[tokio::test]
    async fn test_update_keeps_form_on_backend_error() {
        let api = FakeApi::new(vec![employee(4, "Luis Pérez", "Gerente", "luis@super.co")]);
        let mut list = ListController::new(api.clone());
        list.load().await.unwrap();

        let mut form = FormController::<EmployeeForm>::new();
        form.start_edit(list.find(4).unwrap());
        assert_eq!(form.submit_label(), "Update employee");
        form.set_field("salary", "2000000").unwrap();

        api.fail_next(409, "Email already registered");
        let err = form.submit(&mut list).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (409): Email already registered");
        assert_eq!(form.form().salary, "2000000");
        assert_eq!(form.editing_id(), Some(4));

        let done = form.submit(&mut list).await.unwrap();
        assert_eq!(done.kind, SubmitKind::Updated);
        assert_eq!(list.find(4).unwrap().salary, 2_000_000);
        assert_eq!(form.submit_label(), "Create employee");
    }

    #[test]
    fn test_cancel_restores_create_mode() {
        let mut form = FormController::<UserForm>::new();
        form.start_edit(&user(9, "Ana", "ana@x.co", "3001234567"));
        assert_eq!(form.submit_label(), "Update user");

        form.cancel();
        assert_eq!(form.editing_id(), None);
        assert_eq!(form.submit_label(), "Create user");
        assert_eq!(form.form(), &UserForm::default());
    }

    #[test]
    fn test_live_validation_clears_fixed_field() {
        let mut form = FormController::<UserForm>::new();
        form.set_field("phone", "123").unwrap();
        form.validate_field("phone").unwrap();
        assert!(form.errors().get("phone").is_some());

        form.set_field("phone", "300 123 4567").unwrap();
        assert!(form.errors().get("phone").is_none());

        assert!(matches!(
            form.set_field("salary", "1"),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn test_user_payload_mapping() {
        let mut form = UserForm {
            name: " Ana ".into(),
            email: "ana@x.co".into(),
            phone: "3001234567".into(),
            address: "   ".into(),
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.name, "Ana");
        assert_eq!(payload.address, None);

        form.address = " Calle 10 ".into();
        assert_eq!(form.to_payload().unwrap().address.as_deref(), Some("Calle 10"));
    }
}
