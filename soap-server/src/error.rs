//! Client-visible failures of the SOAP endpoint.
//!
//! Every variant renders as a [`Fault`] body with a non-2xx status, so no
//! failure path can reach the client as an empty response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::{Fault, PersonId};
use crate::repo::RepoError;
use crate::xml::Xml;

pub const FAULT_CLIENT: &str = "Client";
pub const FAULT_SERVER: &str = "Server";

#[derive(Debug, Error)]
pub enum SoapError {
    /// Body is not UTF-8, not well-formed XML, or does not fit the envelope.
    #[error("failed to decode envelope: {0}")]
    Decode(String),

    /// Envelope decoded but carried none of the six known requests.
    #[error("unsupported action")]
    UnsupportedAction,

    #[error("person with email {0} already exists")]
    EmailExists(String),

    #[error("person with ID {0} not found")]
    NotFound(PersonId),

    #[error("{operation} failed: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: RepoError,
    },
}

impl SoapError {
    /// Classify a repository failure for `operation`.
    pub fn from_repo(operation: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::EmailExists { email } => SoapError::EmailExists(email),
            RepoError::PersonNotFound(id) => SoapError::NotFound(id),
            source => SoapError::Repository { operation, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SoapError::Decode(_) | SoapError::UnsupportedAction => StatusCode::BAD_REQUEST,
            SoapError::EmailExists(_) => StatusCode::CONFLICT,
            SoapError::NotFound(_) => StatusCode::NOT_FOUND,
            SoapError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SoapError::Decode(_) => "DecodeError",
            SoapError::UnsupportedAction => "UnsupportedAction",
            SoapError::EmailExists(_) => "EmailExists",
            SoapError::NotFound(_) => "PersonNotFound",
            SoapError::Repository { .. } => "RepositoryError",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Decode and storage details stay in the logs; the client only gets a
    /// generic message for those.
    pub fn fault(&self) -> Fault {
        let message = match self {
            SoapError::Decode(_) => "Invalid request".to_string(),
            SoapError::Repository { .. } => "Internal repository error".to_string(),
            other => other.to_string(),
        };
        let code = if self.is_client_error() {
            FAULT_CLIENT
        } else {
            FAULT_SERVER
        };
        Fault {
            code: code.to_string(),
            message,
            detail: self.kind().to_string(),
        }
    }
}

impl IntoResponse for SoapError {
    fn into_response(self) -> Response {
        (self.status(), Xml(self.fault())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;

    #[test]
    fn repo_errors_are_classified() {
        let err = SoapError::from_repo(
            "add_person",
            RepoError::EmailExists {
                email: "ann@x.com".to_string(),
            },
        );
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), "EmailExists");

        let err = SoapError::from_repo("get_person", RepoError::PersonNotFound(4));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.fault().message, "person with ID 4 not found");

        let err = SoapError::from_repo(
            "get_all_persons",
            RepoError::Db(DbError::UnsupportedSchemaVersion {
                db_version: 9,
                latest_supported: 1,
            }),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("get_all_persons failed"));
    }

    #[test]
    fn server_faults_hide_storage_details() {
        let err = SoapError::from_repo(
            "search_person",
            RepoError::InvalidData("bad row".to_string()),
        );
        let fault = err.fault();
        assert_eq!(fault.code, FAULT_SERVER);
        assert_eq!(fault.message, "Internal repository error");
        assert_eq!(fault.detail, "RepositoryError");
    }

    #[test]
    fn decode_faults_are_generic_client_faults() {
        let fault = SoapError::Decode("unexpected end of file".to_string()).fault();
        assert_eq!(fault.code, FAULT_CLIENT);
        assert_eq!(fault.message, "Invalid request");
        assert_eq!(fault.detail, "DecodeError");
        assert_eq!(SoapError::UnsupportedAction.status(), StatusCode::BAD_REQUEST);
    }
}
