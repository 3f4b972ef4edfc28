//! Stateless SOAP request builder and response parser for the person API.
//!
//! # Design
//! `PersonClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the caller runs the HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, XML_CONTENT_TYPE};
use crate::types::{
    EmptyRequest, Fault, IdRequest, IdResponse, NewPerson, Person, PersonId, PersonListResponse,
    PersonResponse, RequestBody, RequestEnvelope, SearchRequest, StatusResponse,
};

#[derive(Debug, Clone)]
pub struct PersonClient {
    base_url: String,
}

impl PersonClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_add_person(&self, person: &NewPerson) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            add_person: Some(person),
            ..RequestBody::default()
        })
    }

    pub fn build_update_person(&self, person: &Person) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            update_person: Some(person),
            ..RequestBody::default()
        })
    }

    pub fn build_delete_person(&self, id: PersonId) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            delete_person: Some(IdRequest { id }),
            ..RequestBody::default()
        })
    }

    pub fn build_get_person(&self, id: PersonId) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            get_person: Some(IdRequest { id }),
            ..RequestBody::default()
        })
    }

    pub fn build_get_all_persons(&self) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            get_all_persons: Some(EmptyRequest {}),
            ..RequestBody::default()
        })
    }

    pub fn build_search_person(&self, query: &str) -> Result<HttpRequest, ApiError> {
        self.envelope(RequestBody {
            search_person: Some(SearchRequest { query }),
            ..RequestBody::default()
        })
    }

    pub fn parse_add_person(&self, response: HttpResponse) -> Result<PersonId, ApiError> {
        parse_success::<IdResponse>(response).map(|r| r.id)
    }

    pub fn parse_update_person(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_success::<StatusResponse>(response).map(|r| r.status)
    }

    pub fn parse_delete_person(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_success::<StatusResponse>(response).map(|r| r.status)
    }

    pub fn parse_get_person(&self, response: HttpResponse) -> Result<Person, ApiError> {
        parse_success::<PersonResponse>(response).map(|r| r.person)
    }

    pub fn parse_get_all_persons(&self, response: HttpResponse) -> Result<Vec<Person>, ApiError> {
        parse_success::<PersonListResponse>(response).map(|r| r.persons)
    }

    pub fn parse_search_person(&self, response: HttpResponse) -> Result<Vec<Person>, ApiError> {
        parse_success::<PersonListResponse>(response).map(|r| r.persons)
    }

    fn envelope(&self, body: RequestBody<'_>) -> Result<HttpRequest, ApiError> {
        let body = quick_xml::se::to_string(&RequestEnvelope::new(body))
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            url: format!("{}/soap", self.base_url),
            headers: vec![("content-type".to_string(), XML_CONTENT_TYPE.to_string())],
            body,
        })
    }
}

fn parse_success<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if response.status != 200 {
        return Err(fault_error(response));
    }
    quick_xml::de::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map a non-200 response to the matching `ApiError` variant.
fn fault_error(response: HttpResponse) -> ApiError {
    let fault: Fault = match quick_xml::de::from_str(&response.body) {
        Ok(fault) => fault,
        Err(_) => {
            return ApiError::HttpError {
                status: response.status,
                body: response.body,
            }
        }
    };
    match response.status {
        404 => ApiError::NotFound,
        409 => ApiError::Conflict(fault.message),
        status => ApiError::Fault {
            status,
            code: fault.detail,
            message: fault.message,
        },
    }
}
