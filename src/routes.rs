use crate::{
    routes::{
        client::{
            internal_delete_student, internal_get_filtered_students, internal_get_students,
            internal_put_new_student,
        },
        index::get_index_route,
        sse::sse_feed,
        students::{delete_student, get_students, post_student},
    },
    state::SimsState,
};
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub mod client;
pub mod index;
pub mod sse;
pub mod students;

pub fn router(state: SimsState) -> Router {
    let body_limit = state.config().server_config().body_limit;

    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students).post(post_student))
        .route("/students/{id}", delete(delete_student))
        .route(
            "/internal/students",
            get(internal_get_students)
                .put(internal_put_new_student)
                .delete(internal_delete_student),
        )
        .route(
            "/internal/students/filter",
            get(internal_get_filtered_students),
        )
        .route("/sse_feed", get(sse_feed))
        .fallback(get_index_route)
        .method_not_allowed_fallback(get_index_route)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
