//! Envelope, request and response shapes for the person service.
//!
//! # Design
//! The wire envelope carries six optional request elements inside `Body`.
//! `Envelope` mirrors that shape for decoding only; it is collapsed straight
//! away into [`Request`], a tagged union with exactly one active case, so the
//! handlers never see the "none set" or "several set" states.

use serde::{Deserialize, Serialize};

use crate::error::SoapError;

pub type PersonId = u32;

/// A stored person. `id` is zero until the repository assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "ID", default)]
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

/// Leading and trailing whitespace is not significant in text fields; the
/// XML decoder drops it, and requests built in code get the same treatment.
fn normalized(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddPersonRequest {
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

impl AddPersonRequest {
    pub fn into_person(self) -> Person {
        Person {
            id: 0,
            name: normalized(self.name),
            surname: normalized(self.surname),
            age: self.age,
            email: normalized(self.email),
            telephone: normalized(self.telephone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePersonRequest {
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

impl UpdatePersonRequest {
    pub fn into_person(self) -> Person {
        Person {
            id: self.id,
            name: normalized(self.name),
            surname: normalized(self.surname),
            age: self.age,
            email: normalized(self.email),
            telephone: normalized(self.telephone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeletePersonRequest {
    #[serde(rename = "ID")]
    pub id: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetPersonRequest {
    #[serde(rename = "ID")]
    pub id: PersonId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GetAllPersonsRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchPersonRequest {
    #[serde(rename = "Query", default)]
    pub query: String,
}

/// Raw decoded envelope. Only used on the way to [`Request`].
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(
        rename = "Body",
        alias = "soap:Body",
        alias = "soapenv:Body",
        alias = "SOAP-ENV:Body",
        alias = "S:Body"
    )]
    pub body: EnvelopeBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvelopeBody {
    #[serde(rename = "AddPerson", default)]
    pub add_person: Option<AddPersonRequest>,
    #[serde(rename = "DeletePerson", default)]
    pub delete_person: Option<DeletePersonRequest>,
    #[serde(rename = "UpdatePerson", default)]
    pub update_person: Option<UpdatePersonRequest>,
    #[serde(rename = "GetPerson", default)]
    pub get_person: Option<GetPersonRequest>,
    #[serde(rename = "GetAllPersons", default)]
    pub get_all_persons: Option<GetAllPersonsRequest>,
    #[serde(rename = "SearchPerson", default)]
    pub search_person: Option<SearchPersonRequest>,
}

/// The single operation carried by an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add(AddPersonRequest),
    Delete(DeletePersonRequest),
    Update(UpdatePersonRequest),
    Get(GetPersonRequest),
    GetAll,
    Search(SearchPersonRequest),
}

impl Request {
    /// Decode a raw request body into the operation it carries.
    pub fn decode(body: &[u8]) -> Result<Self, SoapError> {
        let text = std::str::from_utf8(body).map_err(|err| SoapError::Decode(err.to_string()))?;
        let envelope: Envelope =
            quick_xml::de::from_str(text).map_err(|err| SoapError::Decode(err.to_string()))?;
        Self::try_from(envelope)
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Request::Add(_) => "add_person",
            Request::Delete(_) => "delete_person",
            Request::Update(_) => "update_person",
            Request::Get(_) => "get_person",
            Request::GetAll => "get_all_persons",
            Request::Search(_) => "search_person",
        }
    }
}

impl TryFrom<Envelope> for Request {
    type Error = SoapError;

    /// Priority order is Add, Delete, Update, Get, GetAll, Search; the first
    /// populated element wins and the rest are ignored.
    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        let body = envelope.body;
        if let Some(request) = body.add_person {
            return Ok(Request::Add(request));
        }
        if let Some(request) = body.delete_person {
            return Ok(Request::Delete(request));
        }
        if let Some(request) = body.update_person {
            return Ok(Request::Update(request));
        }
        if let Some(request) = body.get_person {
            return Ok(Request::Get(request));
        }
        if body.get_all_persons.is_some() {
            return Ok(Request::GetAll);
        }
        if let Some(request) = body.search_person {
            return Ok(Request::Search(request));
        }
        Err(SoapError::UnsupportedAction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "AddPersonResponse")]
pub struct AddPersonResponse {
    #[serde(rename = "ID")]
    pub id: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "UpdatePersonResponse")]
pub struct UpdatePersonResponse {
    #[serde(rename = "Status")]
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "DeletePersonResponse")]
pub struct DeletePersonResponse {
    #[serde(rename = "Status")]
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "GetPersonResponse")]
pub struct GetPersonResponse {
    #[serde(rename = "Person")]
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "GetAllPersonsResponse")]
pub struct GetAllPersonsResponse {
    #[serde(rename = "Person", default)]
    pub persons: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "SearchPersonResponse")]
pub struct SearchPersonResponse {
    #[serde(rename = "Person", default)]
    pub persons: Vec<Person>,
}

/// Error body returned in place of a success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Fault")]
pub struct Fault {
    /// `Client` or `Server`.
    #[serde(rename = "faultcode")]
    pub code: String,
    #[serde(rename = "faultstring")]
    pub message: String,
    /// Error kind, e.g. `PersonNotFound`.
    #[serde(rename = "detail")]
    pub detail: String,
}
