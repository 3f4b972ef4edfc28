//! Domain DTOs and wire shapes for the person API.
//!
//! # Design
//! These mirror the server's XML schema but are defined independently so the
//! client does not link the server. The integration test catches drift.

use serde::{Deserialize, Serialize};

pub type PersonId = u32;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A person as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "ID")]
    pub id: PersonId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Age")]
    pub age: i32,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Telephone")]
    pub telephone: String,
}

/// Payload for adding a person; the service assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Age")]
    pub age: i32,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Telephone")]
    pub telephone: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRequest {
    #[serde(rename = "ID")]
    pub(crate) id: PersonId,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmptyRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    #[serde(rename = "Query")]
    pub(crate) query: &'a str,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct RequestBody<'a> {
    #[serde(rename = "AddPerson", skip_serializing_if = "Option::is_none")]
    pub(crate) add_person: Option<&'a NewPerson>,
    #[serde(rename = "DeletePerson", skip_serializing_if = "Option::is_none")]
    pub(crate) delete_person: Option<IdRequest>,
    #[serde(rename = "UpdatePerson", skip_serializing_if = "Option::is_none")]
    pub(crate) update_person: Option<&'a Person>,
    #[serde(rename = "GetPerson", skip_serializing_if = "Option::is_none")]
    pub(crate) get_person: Option<IdRequest>,
    #[serde(rename = "GetAllPersons", skip_serializing_if = "Option::is_none")]
    pub(crate) get_all_persons: Option<EmptyRequest>,
    #[serde(rename = "SearchPerson", skip_serializing_if = "Option::is_none")]
    pub(crate) search_person: Option<SearchRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "soap:Envelope")]
pub(crate) struct RequestEnvelope<'a> {
    #[serde(rename = "@xmlns:soap")]
    xmlns: &'static str,
    #[serde(rename = "soap:Body")]
    body: RequestBody<'a>,
}

impl<'a> RequestEnvelope<'a> {
    pub(crate) fn new(body: RequestBody<'a>) -> Self {
        Self {
            xmlns: SOAP_ENV_NS,
            body,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdResponse {
    #[serde(rename = "ID")]
    pub(crate) id: PersonId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(rename = "Status")]
    pub(crate) status: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonResponse {
    #[serde(rename = "Person")]
    pub(crate) person: Person,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonListResponse {
    #[serde(rename = "Person", default)]
    pub(crate) persons: Vec<Person>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Fault {
    #[serde(rename = "faultstring")]
    pub(crate) message: String,
    #[serde(rename = "detail")]
    pub(crate) detail: String,
}
