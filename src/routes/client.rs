use crate::{
    data::student::{FIELD_TITLES, FULL_NAME, GENDER, NewStudent, PROGRAM, Student},
    filter::{StudentFilter, distinct_values},
    maud_conveniences::{
        INPUT_CLASSES, ToastKind, form_element, render_table, simple_form_element, title, toast,
    },
    routes::sse::SseEvent,
    state::SimsState,
};
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::{Value, json};

const GENDERS: [&str; 2] = ["Male", "Female"];
const STUDENTS_CHANGED: &str = "students-changed";

/// Full reload: re-reads the storage file and replaces the cached snapshot.
pub async fn internal_get_students(State(state): State<SimsState>) -> Markup {
    let students = state.replace_snapshot(state.read_all().await).await;

    html! {
        (render_students(&students.iter().collect::<Vec<_>>()))
        (filter_options("#gender_filter", "All Genders", distinct_values(&students, GENDER)))
        (filter_options("#program_filter", "All Programs", distinct_values(&students, PROGRAM)))
    }
}

/// Out-of-band replacement of a filter `select`'s options.
fn filter_options(target: &str, all_label: &str, values: Vec<String>) -> Markup {
    html! {
        div hx-swap-oob={"innerHTML:" (target)} {
            option value="" {(all_label)}
            @for value in values {
                option value=(value) {(value)}
            }
        }
    }
}

/// Re-renders from the cached snapshot only; the storage file is not touched.
pub async fn internal_get_filtered_students(
    State(state): State<SimsState>,
    Query(filter): Query<StudentFilter>,
) -> Markup {
    let students = state.snapshot().await;
    render_students(&filter.apply(&students))
}

pub fn render_students(students: &[&Student]) -> Markup {
    let table = render_table(
        FIELD_TITLES,
        students.iter().map(|s| s.field_values()).collect(),
        |row| delete_button(&row[0]),
        "No records found",
    );

    html! {
        (table)
        span hx-swap-oob="innerHTML:#record_count" {(students.len())}
    }
}

fn delete_button(id: &str) -> Markup {
    html! {
        button hx-delete="/internal/students" hx-vals=(json!({ "id": id }).to_string()) hx-confirm={"Delete student " (id) "?"} hx-swap="none" class="px-2 py-1 border border-slate-400 rounded text-xs bg-slate-100 hover:bg-red-600 hover:text-white hover:border-red-600" {
            "Delete"
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StudentForm {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub gmail: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub year_level: String,
    #[serde(default)]
    pub university: String,
}

impl From<&StudentForm> for NewStudent {
    fn from(form: &StudentForm) -> Self {
        let trimmed = |s: &str| Some(s.trim().to_string());

        Self {
            id: trimmed(&form.student_id),
            full_name: trimmed(&form.full_name),
            gender: trimmed(&form.gender),
            gmail: trimmed(&form.gmail),
            program: trimmed(&form.program),
            year_level: Some(Value::String(form.year_level.trim().to_string())),
            university: trimmed(&form.university),
        }
    }
}

pub fn add_student_form(values: &StudentForm) -> Markup {
    html! {
        form id="add_student_form" hx-put="/internal/students" hx-trigger="submit" hx-swap="outerHTML" class="bg-white p-4 rounded shadow" {
            (title("Add Student"))
            div class="grid grid-cols-1 md:grid-cols-2 gap-x-4" {
                (simple_form_element("student_id", "Student ID", None, &values.student_id))
                (simple_form_element("full_name", "Full Name", None, &values.full_name))
                (form_element("gender", "Gender", html! {
                    select required id="gender" name="gender" class=(INPUT_CLASSES) {
                        option value="" {"Select gender"}
                        @for gender in GENDERS {
                            option value=(gender) selected[values.gender == gender] {(gender)}
                        }
                    }
                }))
                (simple_form_element("gmail", "Gmail", Some("email"), &values.gmail))
                (simple_form_element("program", "Program", None, &values.program))
                (simple_form_element("year_level", "Year Level", None, &values.year_level))
                (simple_form_element("university", "University", None, &values.university))
            }
            button type="submit" class="bg-blue-600 hover:bg-blue-800 text-white font-bold py-2 px-4 rounded" {
                "Add Student"
            }
        }
    }
}

pub async fn internal_put_new_student(
    State(state): State<SimsState>,
    Form(form): Form<StudentForm>,
) -> Response {
    let result = match NewStudent::from(&form).into_student() {
        Ok(student) => state.insert(student).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(student) => {
            state.send_sse_event(SseEvent::CrudStudent);
            (
                [("HX-Trigger", STUDENTS_CHANGED)],
                html! {
                    (add_student_form(&StudentForm::default()))
                    (toast(ToastKind::Success, format!("Added {}.", student.text(FULL_NAME))))
                },
            )
                .into_response()
        }
        Err(e) => {
            warn!(?e, "Unable to add student from form");
            html! {
                (add_student_form(&form))
                (toast(ToastKind::Failure, e.to_string()))
            }
            .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct IdForm {
    pub id: String,
}

pub async fn internal_delete_student(
    State(state): State<SimsState>,
    Query(IdForm { id }): Query<IdForm>,
) -> Response {
    match state.remove(&id).await {
        Ok(removed) => {
            state.send_sse_event(SseEvent::CrudStudent);
            (
                [("HX-Trigger", STUDENTS_CHANGED)],
                toast(ToastKind::Success, format!("Deleted {}.", removed.text(FULL_NAME))),
            )
                .into_response()
        }
        Err(e) => {
            warn!(?e, "Unable to delete student");
            toast(ToastKind::Failure, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{call, call_text, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    fn body(id: &str, name: &str, gender: &str, program: &str) -> serde_json::Value {
        json!({
            "Student ID": id,
            "Full Name": name,
            "Gender": gender,
            "Gmail": "x@gmail.com",
            "Program": program,
            "Year Level": 2,
            "University": "U"
        })
    }

    #[tokio::test]
    async fn load_renders_rows_programs_and_count() {
        let (router, _dir) = test_app();
        call(&router, "POST", "/students", Some(body("S1", "Ann Lee", "Female", "CS"))).await;
        call(&router, "POST", "/students", Some(body("S2", "Bob Diaz", "Male", "IT"))).await;
        call(&router, "POST", "/students", Some(body("S3", "Cy Ng", "Male", "CS"))).await;

        let (status, html) = call_text(&router, "GET", "/internal/students", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("title=\"Ann Lee\""));
        assert!(html.contains("Bob Diaz"));
        assert!(html.contains("<span hx-swap-oob=\"innerHTML:#record_count\">3</span>"));
        assert!(html.contains("<option value=\"CS\">CS</option><option value=\"IT\">IT</option>"));
        assert!(html.contains(
            "<option value=\"\">All Genders</option><option value=\"Female\">Female</option><option value=\"Male\">Male</option>"
        ));
        assert_eq!(html.matches("hx-delete=").count(), 3);
    }

    #[tokio::test]
    async fn empty_list_renders_placeholder() {
        let (router, _dir) = test_app();

        let (_, html) = call_text(&router, "GET", "/internal/students", None).await;
        assert!(html.contains("No records found"));
        assert!(html.contains(">0</span>"));
    }

    #[tokio::test]
    async fn filter_uses_the_cached_snapshot() {
        let (router, dir) = test_app();
        call(&router, "POST", "/students", Some(body("S1", "Ann Lee", "F", "CS"))).await;
        call(&router, "POST", "/students", Some(body("S2", "Bob Diaz", "M", "IT"))).await;
        call_text(&router, "GET", "/internal/students", None).await;

        std::fs::remove_file(dir.path().join("students.json")).unwrap();

        let (_, html) = call_text(&router, "GET", "/internal/students/filter?search=an", None).await;
        assert!(html.contains("Ann Lee"));
        assert!(!html.contains("Bob Diaz"));
        assert!(html.contains(">1</span>"));

        let (_, html) =
            call_text(&router, "GET", "/internal/students/filter?search=&gender=M&program=", None).await;
        assert!(html.contains("Bob Diaz"));
        assert!(!html.contains("Ann Lee"));
    }

    #[tokio::test]
    async fn form_create_trims_and_clears_the_form() {
        let (router, _dir) = test_app();
        let form = "student_id=+S7+&full_name=Dee+Fox&gender=Female&gmail=d%40f.com&program=CS&year_level=3&university=U";

        let (status, html) = call_text(&router, "PUT", "/internal/students", Some(form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Added Dee Fox."));
        assert!(html.contains("name=\"student_id\" value=\"\""));

        let (_, listed) = call(&router, "GET", "/students", None).await;
        assert_eq!(listed[0]["Student ID"], json!("S7"));
        assert_eq!(listed[0]["Year Level"], json!("3"));
    }

    #[tokio::test]
    async fn failed_form_create_keeps_the_values() {
        let (router, _dir) = test_app();
        let form = "student_id=S8&full_name=&gender=Male&gmail=e%40f.com&program=IT&year_level=1&university=U";

        let (status, html) = call_text(&router, "PUT", "/internal/students", Some(form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("All fields are required."));
        assert!(html.contains("value=\"S8\""));

        let (_, listed) = call(&router, "GET", "/students", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn form_delete_reports_success_and_failure() {
        let (router, _dir) = test_app();
        call(&router, "POST", "/students", Some(body("S 1", "Ann Lee", "F", "CS"))).await;

        let (_, html) = call_text(&router, "DELETE", "/internal/students?id=S%201", None).await;
        assert!(html.contains("Deleted Ann Lee."));

        let (_, html) = call_text(&router, "DELETE", "/internal/students?id=S%201", None).await;
        assert!(html.contains("Student not found."));
    }
}
