use crate::error::{MissingFieldsSnafu, SimsResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

pub const STUDENT_ID: &str = "Student ID";
pub const FULL_NAME: &str = "Full Name";
pub const GENDER: &str = "Gender";
pub const GMAIL: &str = "Gmail";
pub const PROGRAM: &str = "Program";
pub const YEAR_LEVEL: &str = "Year Level";
pub const UNIVERSITY: &str = "University";

/// Column titles, in the order records are serialised and rendered.
pub const FIELD_TITLES: [&str; 7] = [
    STUDENT_ID, FULL_NAME, GENDER, GMAIL, PROGRAM, YEAR_LEVEL, UNIVERSITY,
];

/// One entry of the stored sequence, kept exactly as it appears in the file.
///
/// Extra keys, odd value types and key order all survive a read-modify-write, so a record this
/// server did not write is never lost or reshaped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Student(Value);

impl Student {
    /// Only a string `Student ID` can ever match a lookup.
    pub fn id(&self) -> Option<&str> {
        self.0.get(STUDENT_ID)?.as_str()
    }

    /// The field as display text. Absent and `null` both read as empty.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn field_values(&self) -> [String; 7] {
        FIELD_TITLES.map(|field| self.text(field))
    }
}

impl From<Value> for Student {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A create request before presence checks. Every field may be absent.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct NewStudent {
    #[serde(rename = "Student ID", default)]
    pub id: Option<String>,
    #[serde(rename = "Full Name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Gmail", default)]
    pub gmail: Option<String>,
    #[serde(rename = "Program", default)]
    pub program: Option<String>,
    /// `None` only when the key is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(rename = "Year Level", default, deserialize_with = "present")]
    pub year_level: Option<Value>,
    #[serde(rename = "University", default)]
    pub university: Option<String>,
}

impl NewStudent {
    /// Text fields must be present and non-empty; year level only has to be present, so `0`, `""` and `null` pass.
    pub fn into_student(self) -> SimsResult<Student> {
        let mut missing = vec![];
        let mut required = |name: &'static str, value: Option<String>| match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let id = required(STUDENT_ID, self.id);
        let full_name = required(FULL_NAME, self.full_name);
        let gender = required(GENDER, self.gender);
        let gmail = required(GMAIL, self.gmail);
        let program = required(PROGRAM, self.program);
        let university = required(UNIVERSITY, self.university);

        let Some(year_level) = self.year_level else {
            missing.push(YEAR_LEVEL);
            return MissingFieldsSnafu { missing }.fail();
        };
        snafu::ensure!(missing.is_empty(), MissingFieldsSnafu { missing });

        Ok(Student(json!({
            STUDENT_ID: id,
            FULL_NAME: full_name,
            GENDER: gender,
            GMAIL: gmail,
            PROGRAM: program,
            YEAR_LEVEL: year_level,
            UNIVERSITY: university,
        })))
    }
}
