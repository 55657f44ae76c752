use crate::{
    data::student::Student,
    error::{DuplicateStudentIdSnafu, MissingStudentSnafu, RemoveStudentSnafu, SaveStudentSnafu, SimsResult},
};
use snafu::{ResultExt, Snafu};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StorageError {
    #[snafu(display("Error serialising students"))]
    SerialiseStudents { source: serde_json::Error },
    #[snafu(display("Error creating data directory {}", path.display()))]
    CreateDataDir { source: io::Error, path: PathBuf },
    #[snafu(display("Error writing students to {}", path.display()))]
    WriteStudents { source: io::Error, path: PathBuf },
    #[snafu(display("Error moving {} into place", path.display()))]
    ReplaceStudents { source: io::Error, path: PathBuf },
}

/// The storage file: one pretty-printed JSON array holding every student.
///
/// Every mutation reads the whole sequence, changes it in memory and rewrites the whole file.
/// Mutations are serialised through `write_lock`, and the file is swapped in with a rename so a
/// concurrent [`StudentStore::read_all`] only ever sees a complete document.
#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl StudentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole sequence, each record as stored. Only a missing, unreadable or non-array
    /// file reads as empty; off-schema records are kept.
    pub async fn read_all(&self) -> Vec<Student> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = ?self.path, "No students file yet, treating as empty");
                return vec![];
            }
            Err(e) => {
                error!(?e, path = ?self.path, "Error reading students file");
                return vec![];
            }
        };

        match serde_json::from_str(&contents) {
            Ok(students) => students,
            Err(e) => {
                error!(?e, path = ?self.path, "Error parsing students file");
                vec![]
            }
        }
    }

    async fn write_all(&self, students: &[Student]) -> Result<(), StorageError> {
        let serialised = serde_json::to_string_pretty(students).context(SerialiseStudentsSnafu)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context(CreateDataDirSnafu { path: parent })?;
        }

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, serialised)
            .await
            .context(WriteStudentsSnafu { path: &tmp_path })?;
        if let Err(source) = tokio::fs::rename(&tmp_path, &self.path).await {
            if let Err(e) = tokio::fs::remove_file(&tmp_path).await {
                warn!(?e, path = ?tmp_path, "Unable to clean up temporary students file");
            }
            return Err(source).context(ReplaceStudentsSnafu { path: &self.path });
        }

        Ok(())
    }

    /// Appends `student` unless its ID is already taken.
    pub async fn insert(&self, student: Student) -> SimsResult<Student> {
        let _guard = self.write_lock.lock().await;

        let mut students = self.read_all().await;
        snafu::ensure!(
            !students.iter().any(|s| s.id() == student.id()),
            DuplicateStudentIdSnafu {
                id: student.id().unwrap_or_default()
            }
        );

        students.push(student.clone());
        self.write_all(&students).await.context(SaveStudentSnafu)?;

        info!(id = ?student.id(), count = students.len(), "Added student");
        Ok(student)
    }

    /// Removes the first student whose ID is exactly `id`, returning it.
    pub async fn remove(&self, id: &str) -> SimsResult<Student> {
        let _guard = self.write_lock.lock().await;

        let mut students = self.read_all().await;
        let Some(index) = students.iter().position(|s| s.id() == Some(id)) else {
            return MissingStudentSnafu { id }.fail();
        };

        let removed = students.remove(index);
        self.write_all(&students).await.context(RemoveStudentSnafu)?;

        info!(id, count = students.len(), "Removed student");
        Ok(removed)
    }
}
