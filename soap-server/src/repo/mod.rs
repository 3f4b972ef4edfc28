//! Person persistence contract and its implementations.
//!
//! # Invariants
//! - Email uniqueness and existence checks are atomic inside each
//!   implementation; the handler layer does not serialize them.
//! - IDs are positive and never reused.
//! - List and search results are ordered by ascending ID.
//!
//! # Search
//! The trimmed query matches a person when it is a case-insensitive
//! substring of name, surname, email or telephone, or equals the age when it
//! parses as an integer. An empty query matches everyone.

use async_trait::async_trait;
use thiserror::Error;

use crate::db::DbError;
use crate::model::{DeletePersonRequest, Person, PersonId};

mod memory;
mod sqlite;

pub use memory::InMemoryPersonRepository;
pub use sqlite::SqlitePersonRepository;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("email already exists: {email}")]
    EmailExists { email: String },

    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid persisted person data: {0}")]
    InvalidData(String),

    /// The blocking storage task panicked or its lock was poisoned.
    #[error("storage worker failed: {0}")]
    Worker(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Stores a new person and returns the assigned ID. `person.id` is ignored.
    async fn add_person(&self, person: &Person) -> RepoResult<PersonId>;
    async fn update_person(&self, person: &Person) -> RepoResult<()>;
    async fn delete_person(&self, request: &DeletePersonRequest) -> RepoResult<()>;
    async fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    async fn get_all_persons(&self) -> RepoResult<Vec<Person>>;
    async fn search_person(&self, query: &str) -> RepoResult<Vec<Person>>;
    async fn check_person_by_id(&self, id: PersonId) -> RepoResult<bool>;
}

/// Normalized search input shared by the implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchTerms {
    pub(crate) needle: String,
    pub(crate) age: Option<i32>,
}

impl SearchTerms {
    pub(crate) fn parse(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            needle: trimmed.to_lowercase(),
            age: trimmed.parse().ok(),
        }
    }

    pub(crate) fn matches(&self, person: &Person) -> bool {
        if self.needle.is_empty() || self.age == Some(person.age) {
            return true;
        }
        [&person.name, &person.surname, &person.email, &person.telephone]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}
