use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use log::error;
use serde::Serialize;

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// XML response body, the counterpart of `axum::Json` for this service.
#[derive(Debug, Clone)]
pub struct Xml<T>(pub T);

impl<T: Serialize> IntoResponse for Xml<T> {
    fn into_response(self) -> Response {
        match quick_xml::se::to_string(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(err) => {
                error!("event=response_encode status=error error={err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to encode response",
                )
                    .into_response()
            }
        }
    }
}
