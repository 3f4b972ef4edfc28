use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PersonRepository, RepoError, RepoResult, SearchTerms};
use crate::model::{DeletePersonRequest, Person, PersonId};

#[derive(Debug, Default)]
struct Store {
    persons: BTreeMap<PersonId, Person>,
    last_id: PersonId,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<PersonId>) -> bool {
        self.persons
            .values()
            .any(|p| p.email == email && Some(p.id) != except)
    }
}

/// Process-local repository. Cloning shares the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn add_person(&self, person: &Person) -> RepoResult<PersonId> {
        let mut store = self.store.write().await;
        if store.email_taken(&person.email, None) {
            return Err(RepoError::EmailExists {
                email: person.email.clone(),
            });
        }
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::InvalidData("person ID space exhausted".to_string()))?;
        store.last_id = id;
        store.persons.insert(
            id,
            Person {
                id,
                ..person.clone()
            },
        );
        Ok(id)
    }

    async fn update_person(&self, person: &Person) -> RepoResult<()> {
        let mut store = self.store.write().await;
        if !store.persons.contains_key(&person.id) {
            return Err(RepoError::PersonNotFound(person.id));
        }
        if store.email_taken(&person.email, Some(person.id)) {
            return Err(RepoError::EmailExists {
                email: person.email.clone(),
            });
        }
        store.persons.insert(person.id, person.clone());
        Ok(())
    }

    async fn delete_person(&self, request: &DeletePersonRequest) -> RepoResult<()> {
        let mut store = self.store.write().await;
        store
            .persons
            .remove(&request.id)
            .map(|_| ())
            .ok_or(RepoError::PersonNotFound(request.id))
    }

    async fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        Ok(self.store.read().await.persons.get(&id).cloned())
    }

    async fn get_all_persons(&self) -> RepoResult<Vec<Person>> {
        Ok(self.store.read().await.persons.values().cloned().collect())
    }

    async fn search_person(&self, query: &str) -> RepoResult<Vec<Person>> {
        let terms = SearchTerms::parse(query);
        let store = self.store.read().await;
        Ok(store
            .persons
            .values()
            .filter(|p| terms.matches(p))
            .cloned()
            .collect())
    }

    async fn check_person_by_id(&self, id: PersonId) -> RepoResult<bool> {
        Ok(self.store.read().await.persons.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, email: &str) -> Person {
        Person {
            id: 0,
            name: name.to_string(),
            surname: "Lee".to_string(),
            age: 30,
            email: email.to_string(),
            telephone: "123".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = InMemoryPersonRepository::new();
        let first = repo.add_person(&person("Ann", "ann@x.com")).await.unwrap();
        let second = repo.add_person(&person("Bob", "bob@x.com")).await.unwrap();
        assert_eq!((first, second), (1, 2));

        repo.delete_person(&DeletePersonRequest { id: second }).await.unwrap();
        let third = repo.add_person(&person("Cid", "cid@x.com")).await.unwrap();
        assert_eq!(third, 3);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_insert() {
        let repo = InMemoryPersonRepository::new();
        repo.add_person(&person("Ann", "ann@x.com")).await.unwrap();
        let err = repo.add_person(&person("Other", "ann@x.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::EmailExists { .. }));
        assert_eq!(repo.get_all_persons().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_own_email_but_rejects_anothers() {
        let repo = InMemoryPersonRepository::new();
        let ann = repo.add_person(&person("Ann", "ann@x.com")).await.unwrap();
        repo.add_person(&person("Bob", "bob@x.com")).await.unwrap();

        let mut changed = person("Annie", "ann@x.com");
        changed.id = ann;
        repo.update_person(&changed).await.unwrap();
        assert_eq!(repo.get_person(ann).await.unwrap().unwrap().name, "Annie");

        changed.email = "bob@x.com".to_string();
        let err = repo.update_person(&changed).await.unwrap_err();
        assert!(matches!(err, RepoError::EmailExists { .. }));
    }

    #[tokio::test]
    async fn missing_records_are_reported() {
        let repo = InMemoryPersonRepository::new();
        let mut ghost = person("Ghost", "ghost@x.com");
        ghost.id = 9;
        assert!(matches!(
            repo.update_person(&ghost).await.unwrap_err(),
            RepoError::PersonNotFound(9)
        ));
        assert!(matches!(
            repo.delete_person(&DeletePersonRequest { id: 9 }).await.unwrap_err(),
            RepoError::PersonNotFound(9)
        ));
        assert!(repo.get_person(9).await.unwrap().is_none());
        assert!(!repo.check_person_by_id(9).await.unwrap());
    }

    #[tokio::test]
    async fn search_filters_in_id_order() {
        let repo = InMemoryPersonRepository::new();
        repo.add_person(&person("Ann", "ann@x.com")).await.unwrap();
        repo.add_person(&person("Bob", "bob@y.org")).await.unwrap();
        repo.add_person(&person("Anna", "anna@y.org")).await.unwrap();

        let names: Vec<String> = repo
            .search_person("ann")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Ann", "Anna"]);
        assert!(repo.search_person("zed").await.unwrap().is_empty());
    }
}
