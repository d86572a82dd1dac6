//! ListController - cached collection plus search/category filtering
//!
//! The cache is a full snapshot of the collection. Mutations never patch it:
//! every successful create/update/delete is followed by a fresh `load()`.

use std::sync::Arc;

use roster_client::{ClientResult, ResourceApi};
use shared::Entity;
use shared::types::EntityId;

/// Search box and category filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.category.is_none()
    }
}

/// Items matching `filter`, in their original order
///
/// Case-insensitive substring match of the trimmed term against any search
/// field, AND exact match of the category when one is selected.
pub fn apply_filter<'a, E: Entity>(items: &'a [E], filter: &FilterState) -> Vec<&'a E> {
    let term = filter.search_term.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            term.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
        })
        .filter(|item| match &filter.category {
            Some(category) => item.category() == Some(category.as_str()),
            None => true,
        })
        .collect()
}

/// What the table area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    /// Nothing loaded yet
    Idle,
    /// Rows to draw
    Ready,
    /// The collection is empty
    Empty,
    /// Rows exist but none match the filters
    NoMatches,
    /// Last load failed; the message is shown in place of the rows
    Failed(String),
}

/// Result of a mutation plus the reload that followed it
///
/// The mutation itself succeeded; `reload` is the outcome of the refresh.
#[derive(Debug)]
pub struct Mutated<T> {
    pub value: T,
    pub reload: ClientResult<usize>,
}

/// Collection cache for one entity kind
pub struct ListController<E: Entity> {
    api: Arc<dyn ResourceApi<E>>,
    items: Vec<E>,
    categories: Vec<String>,
    filter: FilterState,
    loaded: bool,
    failure: Option<String>,
}

impl<E: Entity> ListController<E> {
    pub fn new(api: Arc<dyn ResourceApi<E>>) -> Self {
        Self {
            api,
            items: Vec::new(),
            categories: Vec::new(),
            filter: FilterState::default(),
            loaded: false,
            failure: None,
        }
    }

    pub fn api(&self) -> &Arc<dyn ResourceApi<E>> {
        &self.api
    }

    /// Replace the cache with the backend's collection
    ///
    /// On failure the cache is emptied and the error returned for a toast.
    pub async fn load(&mut self) -> ClientResult<usize> {
        let result = self.api.list().await;
        self.loaded = true;

        match result {
            Ok(items) => {
                tracing::debug!(collection = E::COLLECTION, count = items.len(), "Cache replaced");
                self.items = items;
                self.failure = None;
                Ok(self.items.len())
            }
            Err(e) => {
                tracing::error!(collection = E::COLLECTION, error = %e, "Failed to load collection");
                self.items.clear();
                self.failure = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Refresh the category filter options
    ///
    /// Failures are logged and leave the previous options in place.
    pub async fn load_categories(&mut self) {
        match self.api.list_aux().await {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                tracing::warn!(collection = E::COLLECTION, error = %e, "Failed to load filter options");
            }
        }
    }

    /// `value` is the backend's echo of the entity, when it sends one
    pub async fn create(&mut self, payload: &E::Create) -> ClientResult<Mutated<Option<E>>> {
        let value = self.api.create(payload).await?;
        let reload = self.load().await;
        Ok(Mutated { value, reload })
    }

    pub async fn update(
        &mut self,
        id: EntityId,
        payload: &E::Create,
    ) -> ClientResult<Mutated<Option<E>>> {
        let value = self.api.update(id, payload).await?;
        let reload = self.load().await;
        Ok(Mutated { value, reload })
    }

    pub async fn delete(&mut self, id: EntityId) -> ClientResult<Mutated<()>> {
        self.api.delete(id).await?;
        let reload = self.load().await;
        Ok(Mutated { value: (), reload })
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Select a category; an empty value clears the filter
    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category.filter(|c| !c.trim().is_empty());
    }

    pub fn clear_search(&mut self) {
        self.filter.search_term.clear();
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Rows to draw
    pub fn visible(&self) -> Vec<&E> {
        apply_filter(&self.items, &self.filter)
    }

    pub fn table_state(&self) -> TableState {
        if !self.loaded {
            return TableState::Idle;
        }
        if let Some(message) = &self.failure {
            return TableState::Failed(message.clone());
        }
        if self.items.is_empty() {
            TableState::Empty
        } else if self.visible().is_empty() {
            TableState::NoMatches
        } else {
            TableState::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, employee, user};
    use shared::{Employee, User};

    fn staff() -> Vec<Employee> {
        vec![
            employee(1, "Ana Gómez", "Cajero", "ana@super.co"),
            employee(2, "Luis Pérez", "Gerente", "luis@super.co"),
            employee(3, "Marta Ruiz", "Cajero", "marta@otro.com"),
        ]
    }

    #[test]
    fn test_filter_by_term_and_category() {
        let items = staff();

        let by_term = FilterState {
            search_term: "  SUPER ".into(),
            category: None,
        };
        let ids: Vec<_> = apply_filter(&items, &by_term).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let both = FilterState {
            search_term: "super".into(),
            category: Some("Cajero".into()),
        };
        let ids: Vec<_> = apply_filter(&items, &both).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);

        // Category equality is exact
        let partial = FilterState {
            search_term: String::new(),
            category: Some("Caj".into()),
        };
        assert!(apply_filter(&items, &partial).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let items = staff();
        let filter = FilterState {
            search_term: "a".into(),
            category: Some("Cajero".into()),
        };
        let once: Vec<Employee> = apply_filter(&items, &filter).into_iter().cloned().collect();
        let twice: Vec<Employee> = apply_filter(&once, &filter).into_iter().cloned().collect();
        assert_eq!(once, twice);
        assert!(once.iter().all(|e| items.contains(e)));
        assert_eq!(apply_filter(&items, &FilterState::default()).len(), items.len());
    }

    #[test]
    fn test_user_search_includes_phone_and_address() {
        let mut with_address = user(1, "Ana", "ana@x.co", "3001234567");
        with_address.address = Some("Calle 10 #5-20".into());
        let items: Vec<User> = vec![with_address, user(2, "Luis", "luis@x.co", "3109876543")];

        let by_phone = FilterState {
            search_term: "310".into(),
            category: None,
        };
        assert_eq!(apply_filter(&items, &by_phone)[0].id, 2);

        let by_address = FilterState {
            search_term: "calle".into(),
            category: None,
        };
        assert_eq!(apply_filter(&items, &by_address)[0].id, 1);
    }

    #[tokio::test]
    async fn test_load_and_table_states() {
        let api = FakeApi::new(staff());
        let mut list = ListController::new(api.clone());
        assert_eq!(list.table_state(), TableState::Idle);

        assert_eq!(list.load().await.unwrap(), 3);
        assert_eq!(list.table_state(), TableState::Ready);

        list.set_search("nobody");
        assert_eq!(list.table_state(), TableState::NoMatches);
        list.clear_search();
        list.set_category(Some(String::new()));
        assert_eq!(list.filter().category, None);
        assert_eq!(list.visible().len(), 3);

        let empty = FakeApi::<Employee>::new(Vec::new());
        let mut list = ListController::new(empty);
        list.load().await.unwrap();
        assert_eq!(list.table_state(), TableState::Empty);
    }

    #[tokio::test]
    async fn test_failed_load_empties_cache() {
        let api = FakeApi::new(staff());
        let mut list = ListController::new(api.clone());
        list.load().await.unwrap();

        api.fail_next(503, "Service Unavailable");
        let err = list.load().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(list.items().is_empty());
        assert_eq!(
            list.table_state(),
            TableState::Failed("Service Unavailable".into())
        );
    }

    #[tokio::test]
    async fn test_mutations_reload_the_whole_collection() {
        let api = FakeApi::new(staff());
        let mut list = ListController::new(api.clone());

        let done = list.delete(2).await.unwrap();
        assert_eq!(done.reload.unwrap(), 2);
        assert_eq!(api.calls(), vec![Call::Delete(2), Call::List]);
        assert!(list.find(2).is_none());
    }

    #[tokio::test]
    async fn test_category_failure_keeps_previous_options() {
        let api = FakeApi::new(staff());
        api.set_aux(vec!["Cajero".into(), "Gerente".into()]);
        let mut list = ListController::new(api.clone());
        list.load_categories().await;
        assert_eq!(list.categories().len(), 2);

        api.fail_next(500, "boom");
        list.load_categories().await;
        assert_eq!(list.categories().len(), 2);
    }
}
