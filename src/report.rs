//! Renders a resource into a downloadable PDF study report. Building the
//! section model and drawing it are kept separate so the document structure
//! can be tested without touching the PDF backend.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::error::ApiError;
use crate::model::resource::{Question, Resource};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const BODY_WRAP_CHARS: usize = 92;

/// Marks buckets recognised by the question bank section, in print order.
const QUESTION_BUCKETS: [i32; 3] = [2, 4, 8];

#[derive(Debug, PartialEq)]
pub enum Section {
    /// Wrapped paragraph text under a heading.
    Paragraph { heading: String, body: String },
    /// "1. ..." numbered entries.
    NumberedList { heading: String, entries: Vec<String> },
    /// "- ..." bulleted entries.
    BulletList { heading: String, entries: Vec<String> },
    /// One marks bucket of the question bank, each starting on a new page.
    QuestionBank { marks: i32, questions: Vec<Question> },
}

#[derive(Debug)]
pub struct ReportDocument {
    pub title: String,
    pub topic: Option<String>,
    pub subject: Option<String>,
    pub sections: Vec<Section>,
}

/// Assembles the printable section model. Sections with nothing to say are
/// left out entirely rather than rendered as empty headings.
pub fn build_report(resource: &Resource) -> ReportDocument {
    let mut sections = Vec::new();

    if let Some(description) = non_empty(resource.description.as_deref()) {
        sections.push(Section::Paragraph {
            heading: "Description".to_string(),
            body: description.to_string(),
        });
    }
    if let Some(content) = non_empty(resource.content.as_deref()) {
        sections.push(Section::Paragraph {
            heading: "Content".to_string(),
            body: content.to_string(),
        });
    }
    if let Some(explanation) = non_empty(resource.explanation.as_deref()) {
        sections.push(Section::Paragraph {
            heading: "Detailed Explanation".to_string(),
            body: explanation.to_string(),
        });
    }

    let examples: Vec<String> = resource
        .examples
        .iter()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .collect();
    if !examples.is_empty() {
        sections.push(Section::NumberedList {
            heading: "Examples".to_string(),
            entries: examples,
        });
    }

    let bullets: Vec<String> = resource
        .bullet_points
        .iter()
        .filter(|b| !b.trim().is_empty())
        .cloned()
        .collect();
    if !bullets.is_empty() {
        sections.push(Section::BulletList {
            heading: "Key Points".to_string(),
            entries: bullets,
        });
    }

    for marks in QUESTION_BUCKETS {
        let questions: Vec<Question> = resource
            .questions
            .iter()
            .filter(|q| q.marks == marks)
            .cloned()
            .collect();
        if !questions.is_empty() {
            sections.push(Section::QuestionBank { marks, questions });
        }
    }

    ReportDocument {
        title: resource.title.clone(),
        topic: resource.topic.clone(),
        subject: resource.subject.clone(),
        sections,
    }
}

/// Download filename: title with every non-alphanumeric run kept safe for
/// Content-Disposition, plus the extension.
pub fn report_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{safe}.pdf")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Greedy word wrap on a character budget. The builtin PDF fonts carry no
/// metrics here, so the budget approximates the printable width.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

struct PdfWriter {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    layer: printpdf::PdfLayerReference,
    cursor_mm: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, ApiError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ApiError::Report(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ApiError::Report(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            regular,
            bold,
            layer,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn ensure_room(&mut self, needed_mm: f32) {
        if self.cursor_mm - needed_mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, bold: bool, indent_mm: f32) {
        let line_height = size_pt * 0.5;
        self.ensure_room(line_height);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_MM + indent_mm),
            Mm(self.cursor_mm),
            font,
        );
        self.cursor_mm -= line_height;
    }

    fn wrapped(&mut self, text: &str, size_pt: f32, indent_mm: f32) {
        for line in wrap_text(text, BODY_WRAP_CHARS) {
            self.line(&line, size_pt, false, indent_mm);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn heading(&mut self, text: &str) {
        self.gap(4.0);
        self.line(text, 14.0, true, 0.0);
        self.gap(2.0);
    }
}

/// Draws the section model onto A4 pages and returns the raw PDF bytes.
pub fn render_pdf(report: &ReportDocument) -> Result<Vec<u8>, ApiError> {
    let mut writer = PdfWriter::new(&report.title)?;

    writer.line(&report.title, 20.0, true, 0.0);
    writer.gap(2.0);
    if let Some(topic) = &report.topic {
        writer.line(&format!("Topic: {topic}"), 11.0, false, 0.0);
    }
    if let Some(subject) = &report.subject {
        writer.line(&format!("Subject: {subject}"), 11.0, false, 0.0);
    }
    writer.gap(4.0);

    for section in &report.sections {
        match section {
            Section::Paragraph { heading, body } => {
                writer.heading(heading);
                writer.wrapped(body, 11.0, 0.0);
            }
            Section::NumberedList { heading, entries } => {
                writer.heading(heading);
                for (idx, entry) in entries.iter().enumerate() {
                    writer.wrapped(&format!("{}. {entry}", idx + 1), 11.0, 2.0);
                    writer.gap(1.0);
                }
            }
            Section::BulletList { heading, entries } => {
                writer.heading(heading);
                for entry in entries {
                    writer.wrapped(&format!("- {entry}"), 11.0, 2.0);
                    writer.gap(1.0);
                }
            }
            Section::QuestionBank { marks, questions } => {
                writer.new_page();
                writer.line(&format!("{marks} Mark Questions"), 14.0, true, 0.0);
                writer.gap(3.0);
                for (idx, q) in questions.iter().enumerate() {
                    writer.wrapped(&format!("Q{}. {} [{} marks]", idx + 1, q.question, q.marks), 11.0, 0.0);
                    writer.gap(1.0);
                    writer.wrapped(&format!("Answer: {}", q.answer), 11.0, 4.0);
                    writer.gap(3.0);
                }
            }
        }
    }

    writer
        .doc
        .save_to_bytes()
        .map_err(|e| ApiError::Report(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resource() -> Resource {
        Resource {
            id: 1,
            title: "Operating Systems: Unit 2".to_string(),
            subject: Some("Operating Systems".to_string()),
            kind: "notes".to_string(),
            size: None,
            author: Some("Prof. Rao".to_string()),
            notes: None,
            upload_date: Utc::now(),
            url: "/uploads/resources/os-unit-2.pdf".to_string(),
            download_count: 0,
            topic: Some("Scheduling".to_string()),
            description: Some("CPU scheduling algorithms.".to_string()),
            content: None,
            explanation: Some("Round robin assigns fixed time slices.".to_string()),
            examples: vec!["FCFS with three processes".to_string()],
            bullet_points: vec!["Preemption".to_string(), "Turnaround time".to_string()],
            questions: vec![
                Question {
                    marks: 2,
                    question: "Define throughput.".to_string(),
                    answer: "Processes completed per unit time.".to_string(),
                },
                Question {
                    marks: 8,
                    question: "Compare RR and SJF.".to_string(),
                    answer: "RR is preemptive and fair; SJF minimises waiting time.".to_string(),
                },
                Question {
                    marks: 3,
                    question: "Oddly weighted question.".to_string(),
                    answer: "Not in any recognised bucket.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut r = resource();
        r.content = None;
        r.description = Some("   ".to_string());
        r.examples = vec!["".to_string()];
        r.bullet_points.clear();
        r.questions.clear();

        let report = build_report(&r);
        // Only the explanation survives.
        assert_eq!(report.sections.len(), 1);
        assert!(matches!(
            &report.sections[0],
            Section::Paragraph { heading, .. } if heading == "Detailed Explanation"
        ));
    }

    #[test]
    fn questions_bucket_by_marks_and_drop_unrecognised() {
        let report = build_report(&resource());
        let buckets: Vec<i32> = report
            .sections
            .iter()
            .filter_map(|s| match s {
                Section::QuestionBank { marks, .. } => Some(*marks),
                _ => None,
            })
            .collect();
        // The 3-mark question maps to no bucket and disappears.
        assert_eq!(buckets, vec![2, 8]);
    }

    #[test]
    fn full_resource_produces_all_section_kinds_in_order() {
        let report = build_report(&resource());
        assert!(matches!(
            &report.sections[0],
            Section::Paragraph { heading, .. } if heading == "Description"
        ));
        assert!(matches!(
            &report.sections[1],
            Section::Paragraph { heading, .. } if heading == "Detailed Explanation"
        ));
        assert!(matches!(&report.sections[2], Section::NumberedList { .. }));
        assert!(matches!(&report.sections[3], Section::BulletList { .. }));
    }

    #[test]
    fn filename_replaces_every_non_alphanumeric() {
        assert_eq!(
            report_filename("Operating Systems: Unit 2"),
            "Operating_Systems__Unit_2.pdf"
        );
        assert_eq!(report_filename("ml-notes"), "ml_notes.pdf");
    }

    #[test]
    fn wrap_respects_the_character_budget() {
        let text = "alpha beta gamma delta";
        let lines = wrap_text(text, 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn render_produces_a_pdf_header() {
        let report = build_report(&resource());
        let bytes = render_pdf(&report).expect("render succeeds");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
