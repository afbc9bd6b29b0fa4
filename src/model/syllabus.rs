use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportantQuestion {
    pub question: String,
    pub marks: i32,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IaUnit {
    pub unit_number: i32,
    pub unit_name: String,
    pub topics: Vec<String>,
    pub marks_weightage: i32,
    pub important_questions: Vec<ImportantQuestion>,
    pub question_pattern: Option<String>,
    pub estimated_hours: i32,
}

/// One internal-assessment exam section (IA1..IA3) with its units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IaSection {
    pub exam_type: String,
    pub exam_date: Option<NaiveDate>,
    pub units: Vec<IaUnit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chapter {
    pub chapter_number: i32,
    pub chapter_name: String,
    pub topics: Vec<String>,
    pub priority: Option<String>,
    pub repeated_in_previous_years: bool,
    pub reference_books: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemesterUnit {
    pub unit_number: i32,
    pub unit_name: String,
    pub chapters: Vec<Chapter>,
    pub total_marks: i32,
    pub estimated_hours: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: String,
    pub unit_number: Option<i32>,
    pub upload_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusItem {
    pub id: i32,
    pub course_id: String,
    pub course_name: String,
    pub semester: i32,
    pub academic_year: String,
    /// Dashboard-only fields: a headline topic and an associated calendar
    /// date, used for deadlines and the per-course overview.
    pub topic: Option<String>,
    pub date: Option<NaiveDate>,
    #[sqlx(json)]
    pub ia_syllabus: Vec<IaSection>,
    #[sqlx(json)]
    pub semester_syllabus: Vec<SemesterUnit>,
    #[sqlx(json)]
    pub materials: Vec<Material>,
    pub created_by: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing shape with unit counts instead of the full nested payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusSummary {
    pub id: i32,
    pub course_name: String,
    pub semester: i32,
    pub academic_year: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub ia_count: usize,
    pub sem_units_count: usize,
}

impl From<&SyllabusItem> for SyllabusSummary {
    fn from(s: &SyllabusItem) -> Self {
        Self {
            id: s.id,
            course_name: s.course_name.clone(),
            semester: s.semester,
            academic_year: s.academic_year.clone(),
            status: s.status.clone(),
            created_at: s.created_at,
            ia_count: s.ia_syllabus.len(),
            sem_units_count: s.semester_syllabus.len(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSyllabusRequest {
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub semester: Option<i32>,
    pub academic_year: Option<String>,
    pub topic: Option<String>,
    pub date: Option<NaiveDate>,
    pub ia_syllabus: Option<Vec<IaSection>>,
    pub semester_syllabus: Option<Vec<SemesterUnit>>,
    pub materials: Option<Vec<Material>>,
    pub status: Option<String>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSyllabusRequest {
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub semester: Option<i32>,
    pub academic_year: Option<String>,
    pub topic: Option<String>,
    pub date: Option<NaiveDate>,
    pub ia_syllabus: Option<Vec<IaSection>>,
    pub semester_syllabus: Option<Vec<SemesterUnit>>,
    pub materials: Option<Vec<Material>>,
    pub status: Option<String>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIaUnitRequest {
    pub exam_type: Option<String>,
    pub unit: Option<IaUnit>,
}
