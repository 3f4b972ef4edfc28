//! Envelope dispatch and the six person operations.
//!
//! Each operation maps its request onto one repository call and ends in
//! either a typed response or a [`SoapError`] fault. Nothing here keeps
//! state between requests.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use log::{debug, Level};
use uuid::Uuid;

use crate::error::SoapError;
use crate::events::Event;
use crate::model::{
    AddPersonRequest, AddPersonResponse, DeletePersonRequest, DeletePersonResponse,
    GetAllPersonsResponse, GetPersonRequest, GetPersonResponse, PersonId, Request,
    SearchPersonRequest, SearchPersonResponse, UpdatePersonRequest, UpdatePersonResponse,
};
use crate::repo::RepoError;
use crate::xml::Xml;
use crate::AppState;

type OpResult<T> = Result<Xml<T>, SoapError>;

pub async fn soap_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    debug!(
        "event=soap_request request_id={request_id} bytes={} body={}",
        body.len(),
        String::from_utf8_lossy(&body)
    );

    let request = match Request::decode(&body) {
        Ok(request) => request,
        Err(err) => {
            state.events.record(
                Event::failure(Level::Warn, "request_rejected", "dispatch").with_error(&err),
            );
            return err.into_response();
        }
    };

    debug!(
        "event=soap_dispatch request_id={request_id} op={}",
        request.operation()
    );
    match request {
        Request::Add(request) => add_person(&state, request).await.into_response(),
        Request::Delete(request) => delete_person(&state, request).await.into_response(),
        Request::Update(request) => update_person(&state, request).await.into_response(),
        Request::Get(request) => get_person(&state, request).await.into_response(),
        Request::GetAll => get_all_persons(&state).await.into_response(),
        Request::Search(request) => search_person(&state, request).await.into_response(),
    }
}

/// Record a failed operation and turn it into the fault sent to the client.
fn fail(
    state: &AppState,
    operation: &'static str,
    id: Option<PersonId>,
    err: SoapError,
) -> SoapError {
    let level = if err.is_client_error() {
        Level::Warn
    } else {
        Level::Error
    };
    let event = Event::failure(level, "operation_failed", operation).with_error(&err);
    state.events.record(match id {
        Some(id) => event.with_id(id),
        None => event,
    });
    err
}

fn repo_fail(
    state: &AppState,
    operation: &'static str,
    id: Option<PersonId>,
    err: RepoError,
) -> SoapError {
    fail(state, operation, id, SoapError::from_repo(operation, err))
}

/// Existence check shared by update and delete.
async fn ensure_exists(
    state: &AppState,
    operation: &'static str,
    id: PersonId,
) -> Result<(), SoapError> {
    let exists = state
        .repo
        .check_person_by_id(id)
        .await
        .map_err(|err| repo_fail(state, operation, Some(id), err))?;
    if !exists {
        return Err(fail(state, operation, Some(id), SoapError::NotFound(id)));
    }
    Ok(())
}

async fn add_person(state: &AppState, request: AddPersonRequest) -> OpResult<AddPersonResponse> {
    const OP: &str = "add_person";
    let person = request.into_person();
    let id = state
        .repo
        .add_person(&person)
        .await
        .map_err(|err| repo_fail(state, OP, None, err))?;

    state.events.record(Event::info("person_added", OP).with_id(id));
    Ok(Xml(AddPersonResponse { id }))
}

async fn update_person(
    state: &AppState,
    request: UpdatePersonRequest,
) -> OpResult<UpdatePersonResponse> {
    const OP: &str = "update_person";
    let id = request.id;
    ensure_exists(state, OP, id).await?;

    let person = request.into_person();
    state
        .repo
        .update_person(&person)
        .await
        .map_err(|err| repo_fail(state, OP, Some(id), err))?;

    state.events.record(Event::info("person_updated", OP).with_id(id));
    Ok(Xml(UpdatePersonResponse { status: true }))
}

async fn delete_person(
    state: &AppState,
    request: DeletePersonRequest,
) -> OpResult<DeletePersonResponse> {
    const OP: &str = "delete_person";
    let id = request.id;
    ensure_exists(state, OP, id).await?;

    state
        .repo
        .delete_person(&request)
        .await
        .map_err(|err| repo_fail(state, OP, Some(id), err))?;

    state.events.record(Event::info("person_deleted", OP).with_id(id));
    Ok(Xml(DeletePersonResponse { status: true }))
}

async fn get_person(state: &AppState, request: GetPersonRequest) -> OpResult<GetPersonResponse> {
    const OP: &str = "get_person";
    let id = request.id;
    match state.repo.get_person(id).await {
        Ok(Some(person)) => Ok(Xml(GetPersonResponse { person })),
        Ok(None) => Err(fail(state, OP, Some(id), SoapError::NotFound(id))),
        Err(err) => Err(repo_fail(state, OP, Some(id), err)),
    }
}

async fn get_all_persons(state: &AppState) -> OpResult<GetAllPersonsResponse> {
    const OP: &str = "get_all_persons";
    let persons = state
        .repo
        .get_all_persons()
        .await
        .map_err(|err| repo_fail(state, OP, None, err))?;
    Ok(Xml(GetAllPersonsResponse { persons }))
}

async fn search_person(
    state: &AppState,
    request: SearchPersonRequest,
) -> OpResult<SearchPersonResponse> {
    const OP: &str = "search_person";
    let persons = state
        .repo
        .search_person(&request.query)
        .await
        .map_err(|err| repo_fail(state, OP, None, err))?;
    Ok(Xml(SearchPersonResponse { persons }))
}
