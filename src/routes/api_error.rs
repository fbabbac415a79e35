use crate::routes::error_chain_fmt;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::{self, json, Json};
use rocket::{Request, Response};

/// One rejected request field, serialized as `{"param": ..., "msg": ...}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> FieldError {
        FieldError {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

/// Accumulates every problem with a request body so that a single 400
/// response can report all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, param: &str, msg: impl Into<String>) {
        self.0.push(FieldError::new(param, msg));
    }

    pub fn require<T>(&mut self, param: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(param, format!("{} must be provided", param));
        }
        value
    }

    pub fn check<T>(&mut self, param: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(msg) => {
                self.push(param, msg);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("The request failed validation: {}", describe(.0))]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.param, e.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    pub fn invalid(param: &str, msg: impl Into<String>) -> ApiError {
        ApiError::Validation(vec![FieldError::new(param, msg)])
    }

    pub fn status(&self) -> Status {
        match self {
            ApiError::Validation(_) => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Unexpected(_) => Status::InternalServerError,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors.0)
    }
}

impl<'a> From<json::Error<'a>> for ApiError {
    fn from(e: json::Error<'a>) -> Self {
        match e {
            json::Error::Parse(_, e) => ApiError::invalid("body", e.to_string()),
            json::Error::Io(e) => ApiError::invalid("body", format!("Failed to read body: {}", e)),
        }
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let body = match &self {
            ApiError::Validation(errors) => {
                tracing::info!(error = %self, "Rejected an invalid request");
                json!({ "errors": errors })
            }
            ApiError::NotFound(message) => {
                tracing::info!(error = %self, "No matching record");
                json!({ "error": message })
            }
            ApiError::Unexpected(_) => {
                tracing::error!(error.cause_chain = ?self, "Request failed unexpectedly");
                json!({ "error": "Internal server error" })
            }
        };
        Response::build_from(Json(body).respond_to(request)?)
            .status(self.status())
            .ok()
    }
}

/// Unwraps a JSON data guard, turning a malformed or missing body into a
/// validation error.
pub fn json_body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    body.map(Json::into_inner).map_err(ApiError::from)
}
