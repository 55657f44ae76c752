use crate::store::StorageError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snafu::Snafu;
use std::num::ParseIntError;

pub type SimsResult<T> = Result<T, SimsError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SimsError {
    #[snafu(display("All fields are required."))]
    MissingFields { missing: Vec<&'static str> },
    #[snafu(display("{}", source.body_text()))]
    InvalidBody { source: JsonRejection },
    #[snafu(display("Student ID already exists."))]
    DuplicateStudentId { id: String },
    #[snafu(display("Student not found."))]
    MissingStudent { id: String },
    #[snafu(display("Could not save student."))]
    SaveStudent { source: StorageError },
    #[snafu(display("Could not delete student."))]
    RemoveStudent { source: StorageError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse request body limit"))]
    ParseBodyLimit { source: ParseIntError },
}

impl SimsError {
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT; //conflict

        match self {
            Self::MissingFields { .. } | Self::InvalidBody { .. } => BI,
            Self::DuplicateStudentId { .. } => CF,
            Self::MissingStudent { .. } => NF,
            Self::SaveStudent { .. } | Self::RemoveStudent { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::ParseBodyLimit { .. } => ISE,
        }
    }
}

impl IntoResponse for SimsError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Rejected request");
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_statuses() {
        let missing = SimsError::MissingFields {
            missing: vec!["Gmail"],
        };
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "All fields are required.");

        let duplicate = SimsError::DuplicateStudentId { id: "S1".into() };
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

        let missing_student = SimsError::MissingStudent { id: "S1".into() };
        assert_eq!(missing_student.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing_student.to_string(), "Student not found.");
    }
}
