use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Empty optional fields serialize as `null` so an edit can clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub instructor_id: Option<i64>,
    /// Path under `/storage/**`.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub instructor: Option<User>,
}

impl Course {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    pub fn instructor_name(&self) -> Option<&str> {
        self.instructor.as_ref().map(|u| u.name.as_str())
    }
}

/// Like [`CategoryForm`], cleared fields go out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseForm {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub instructor_id: Option<i64>,
}

impl CourseForm {
    pub fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            category_id: course.category_id,
            instructor_id: course.instructor_id,
        }
    }
}

/// A PDF material attached to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePdf {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    /// Path under `/storage/**`.
    pub file_path: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CoursePdf {
    /// Suggested file name when saving the document locally.
    pub fn download_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = stem.trim_matches('_');
        if stem.is_empty() {
            format!("materi-{}.pdf", self.id)
        } else {
            format!("{stem}.pdf")
        }
    }
}

/// Where a PDF's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PdfSource {
    /// Authenticated per-resource download endpoint.
    Api { pdf_id: i64 },
    /// Public file under `/storage/**`; fetched without credentials.
    Static { path: String },
}

/// Raw bytes of a fetched document.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPayload {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

/// A file picked by the user, ready to go into a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: "application/pdf".to_string(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_with_nested_relations() {
        let course: Course = serde_json::from_value(json!({
            "id": 1,
            "title": "Dasar Rust",
            "category_id": 2,
            "thumbnail": "thumbnails/rust.png",
            "category": {"id": 2, "name": "Pemrograman"},
            "instructor": {"id": 9, "name": "Andi", "email": "andi@kursus.test", "role": "instruktur"}
        }))
        .unwrap();
        assert_eq!(course.category_name(), Some("Pemrograman"));
        assert_eq!(course.instructor_name(), Some("Andi"));
        assert_eq!(course.description, None);
    }

    #[test]
    fn test_download_name() {
        let pdf = CoursePdf {
            id: 3,
            course_id: 1,
            title: "Modul 1: Pengenalan".into(),
            file_path: "pdfs/a.pdf".into(),
            created_at: None,
        };
        assert_eq!(pdf.download_name(), "Modul_1__Pengenalan.pdf");

        let untitled = CoursePdf {
            title: "???".into(),
            ..pdf
        };
        assert_eq!(untitled.download_name(), "materi-3.pdf");
    }
}
