use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};
use tokio::task;

use super::{PersonRepository, RepoError, RepoResult, SearchTerms};
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::{DeletePersonRequest, Person, PersonId};

const PERSON_SELECT_SQL: &str = "SELECT id, name, surname, age, email, telephone FROM persons";

/// Relational repository over a single SQLite connection.
///
/// Each call runs on the blocking pool and holds the connection lock for its
/// whole statement, so the `UNIQUE(email)` constraint and the affected-row
/// checks are atomic.
pub struct SqlitePersonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePersonRepository {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    async fn with_conn<T, F>(&self, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| RepoError::Worker("connection lock poisoned".to_string()))?;
            op(&conn)
        })
        .await
        .map_err(|err| RepoError::Worker(err.to_string()))?
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn add_person(&self, person: &Person) -> RepoResult<PersonId> {
        let person = person.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO persons (name, surname, age, email, telephone)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    person.name,
                    person.surname,
                    person.age,
                    person.email,
                    person.telephone
                ],
            )
            .map_err(|err| write_error(err, &person.email))?;

            let rowid = conn.last_insert_rowid();
            PersonId::try_from(rowid)
                .map_err(|_| RepoError::InvalidData(format!("row id {rowid} out of range")))
        })
        .await
    }

    async fn update_person(&self, person: &Person) -> RepoResult<()> {
        let person = person.clone();
        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE persons
                     SET name = ?1, surname = ?2, age = ?3, email = ?4, telephone = ?5
                     WHERE id = ?6;",
                    params![
                        person.name,
                        person.surname,
                        person.age,
                        person.email,
                        person.telephone,
                        person.id
                    ],
                )
                .map_err(|err| write_error(err, &person.email))?;

            if changed == 0 {
                return Err(RepoError::PersonNotFound(person.id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_person(&self, request: &DeletePersonRequest) -> RepoResult<()> {
        let id = request.id;
        self.with_conn(move |conn| {
            let changed = conn.execute("DELETE FROM persons WHERE id = ?1;", params![id])?;
            if changed == 0 {
                return Err(RepoError::PersonNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        self.with_conn(move |conn| {
            let person = conn
                .query_row(
                    &format!("{PERSON_SELECT_SQL} WHERE id = ?1;"),
                    params![id],
                    map_person,
                )
                .optional()?;
            Ok(person)
        })
        .await
    }

    async fn get_all_persons(&self) -> RepoResult<Vec<Person>> {
        self.with_conn(load_ordered).await
    }

    /// SQLite `lower()` only folds ASCII, so matching runs on the loaded rows
    /// with the same predicate as the in-memory store.
    async fn search_person(&self, query: &str) -> RepoResult<Vec<Person>> {
        let terms = SearchTerms::parse(query);
        self.with_conn(move |conn| {
            let mut persons = load_ordered(conn)?;
            persons.retain(|person| terms.matches(person));
            Ok(persons)
        })
        .await
    }

    async fn check_person_by_id(&self, id: PersonId) -> RepoResult<bool> {
        self.with_conn(move |conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM persons WHERE id = ?1);",
                params![id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }
}

fn load_ordered(conn: &Connection) -> RepoResult<Vec<Person>> {
    let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id;"))?;
    let persons = stmt
        .query_map([], map_person)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(persons)
}

fn map_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        surname: row.get(2)?,
        age: row.get(3)?,
        email: row.get(4)?,
        telephone: row.get(5)?,
    })
}

/// `email` is the only unique column besides the rowid, so a unique
/// violation on write means the email is taken.
fn write_error(err: rusqlite::Error, email: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::EmailExists {
                email: email.to_string(),
            }
        }
        _ => err.into(),
    }
}
