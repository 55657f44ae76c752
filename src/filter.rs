use crate::data::student::{FULL_NAME, GENDER, PROGRAM, Student};
use serde::Deserialize;

/// Search box plus the gender and program selectors. Empty strings mean "no filter".
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StudentFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub program: String,
}

impl StudentFilter {
    pub fn matches(&self, student: &Student) -> bool {
        let search = self.search.to_lowercase();
        let program = student.text(PROGRAM);
        let search_hit = student.text(FULL_NAME).to_lowercase().contains(&search)
            || program.to_lowercase().contains(&search);

        search_hit
            && (self.gender.is_empty() || student.text(GENDER) == self.gender)
            && (self.program.is_empty() || program == self.program)
    }

    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Every distinct non-empty value of `field`, in order of first appearance.
pub fn distinct_values(students: &[Student], field: &str) -> Vec<String> {
    let mut values: Vec<String> = vec![];
    for value in students.iter().map(|s| s.text(field)) {
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::student;

    fn roster() -> Vec<Student> {
        vec![
            student("S1", "Ann Lee", "F", "CS"),
            student("S2", "Bob Diaz", "M", "IT"),
        ]
    }

    fn names(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.text(FULL_NAME)).collect()
    }

    #[test]
    fn search_matches_name_substring() {
        let students = roster();
        let filter = StudentFilter {
            search: "an".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Ann Lee"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_program() {
        let students = roster();
        let filter = StudentFilter {
            search: "it".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Bob Diaz"]);

        let filter = StudentFilter {
            search: "LEE".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Ann Lee"]);
    }

    #[test]
    fn gender_filter_is_exact() {
        let students = roster();
        let filter = StudentFilter {
            gender: "M".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Bob Diaz"]);
    }

    #[test]
    fn all_criteria_must_hold() {
        let students = roster();
        let filter = StudentFilter {
            search: "an".into(),
            gender: "M".into(),
            program: String::new(),
        };
        assert!(filter.apply(&students).is_empty());

        let filter = StudentFilter {
            program: "CS".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Ann Lee"]);
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let students = roster();
        assert_eq!(
            names(&StudentFilter::default().apply(&students)),
            vec!["Ann Lee", "Bob Diaz"]
        );
    }

    #[test]
    fn programs_are_distinct_in_first_seen_order() {
        let students = vec![
            student("S1", "A", "F", "IT"),
            student("S2", "B", "M", "CS"),
            student("S3", "C", "F", "IT"),
            student("S4", "D", "M", "Nursing"),
        ];
        assert_eq!(distinct_values(&students, PROGRAM), vec!["IT", "CS", "Nursing"]);
        assert_eq!(distinct_values(&students, GENDER), vec!["F", "M"]);
    }

    #[test]
    fn off_schema_records_filter_by_display_text() {
        let students = vec![
            Student::from(serde_json::json!({ "Student ID": "S1", "Full Name": "Ann Lee" })),
            student("S2", "Bob Diaz", "M", "IT"),
        ];

        let filter = StudentFilter {
            search: "ann".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&students)), vec!["Ann Lee"]);
        assert_eq!(distinct_values(&students, PROGRAM), vec!["IT"]);
    }
}
