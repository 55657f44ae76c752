use crate::{
    data::student::FIELD_TITLES,
    maud_conveniences::{INPUT_CLASSES, placeholder_row, render_table},
    routes::client::{StudentForm, add_student_form},
    state::SimsState,
};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use maud::html;

const LOAD_FAILED: &str = "Could not load students.";

/// The entry document. Served for `/` and for any other unmatched `GET`.
pub async fn get_index_route(State(state): State<SimsState>, method: Method) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    let on_load_error = format!(
        "document.getElementById('students_tbody').innerHTML = '{}'",
        placeholder_row(FIELD_TITLES.len() + 1, LOAD_FAILED).into_string()
    );

    state.render(html! {
        div class="max-w-7xl mx-auto p-6 flex flex-col space-y-6" {
            h1 class="text-3xl font-semibold" {"Student Information Management System"}

            (add_student_form(&StudentForm::default()))

            div class="bg-white p-4 rounded shadow flex flex-col space-y-4" {
                form id="filters" hx-get="/internal/students/filter" hx-trigger="input, change" hx-target="#students_table" class="flex flex-row flex-wrap gap-4 items-center" {
                    input type="search" id="search" name="search" placeholder="Search name or program" class=(INPUT_CLASSES) {}
                    select id="gender_filter" name="gender" class=(INPUT_CLASSES) {
                        option value="" {"All Genders"}
                    }
                    select id="program_filter" name="program" class=(INPUT_CLASSES) {
                        option value="" {"All Programs"}
                    }
                    p class="whitespace-nowrap" {
                        "Records: "
                        span id="record_count" class="font-semibold" {"0"}
                    }
                }

                div sse-connect="/sse_feed" {
                    div id="students_table" hx-get="/internal/students" hx-trigger="load, sse:crud_student, students-changed from:body" "hx-on::response-error"=(on_load_error) "hx-on::send-error"=(on_load_error) {
                        (render_table(FIELD_TITLES, vec![], |_| html! {}, "Loading students..."))
                    }
                }
            }
        }
    })
    .into_response()
}
