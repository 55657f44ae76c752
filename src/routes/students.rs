use crate::{
    data::student::{NewStudent, Student},
    error::{InvalidBodySnafu, SimsResult},
    routes::sse::SseEvent,
    state::SimsState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use snafu::ResultExt;

pub async fn get_students(State(state): State<SimsState>) -> Json<Vec<Student>> {
    Json(state.read_all().await)
}

pub async fn post_student(
    State(state): State<SimsState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> SimsResult<(StatusCode, Json<Student>)> {
    let Json(new_student) = payload.context(InvalidBodySnafu)?;
    let student = state.insert(new_student.into_student()?).await?;
    state.send_sse_event(SseEvent::CrudStudent);

    Ok((StatusCode::CREATED, Json(student)))
}

#[derive(Serialize)]
pub struct RemovedStudent {
    success: bool,
    removed: Student,
}

pub async fn delete_student(
    State(state): State<SimsState>,
    Path(id): Path<String>,
) -> SimsResult<Json<RemovedStudent>> {
    let removed = state.remove(&id).await?;
    state.send_sse_event(SseEvent::CrudStudent);

    Ok(Json(RemovedStudent {
        success: true,
        removed,
    }))
}
