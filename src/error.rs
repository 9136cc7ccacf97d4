use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("no element matches \"{0}\"")]
    MissingElement(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("settings error: {0}")]
    Settings(String),
}

impl ResponseError for FolioError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        error!("Request failed: {}", self);
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
