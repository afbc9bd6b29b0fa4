//! The dashboard aggregation pipeline: pure transforms over already-fetched
//! records. Every function here recomputes from scratch per request; nothing
//! is cached between calls.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::model::activity::{Activity, ActivityType};
use crate::model::syllabus::SyllabusItem;
use crate::model::video::Video;

/// Parses a clock-style duration ("H:MM:SS", "MM:SS", or bare minutes) into
/// fractional minutes. Anything unparseable counts as zero.
pub fn parse_duration_minutes(duration: &str) -> f64 {
    let parts: Vec<Option<f64>> = duration
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect();
    if parts.iter().any(|p| p.is_none()) {
        return 0.0;
    }
    match parts.as_slice() {
        [Some(h), Some(m), Some(s)] => h * 60.0 + m + s / 60.0,
        [Some(m), Some(s)] => m + s / 60.0,
        [Some(m)] => *m,
        _ => 0.0,
    }
}

/// Total minutes as dashboard study hours, rounded to one decimal.
pub fn study_hours(total_minutes: f64) -> f64 {
    (total_minutes / 60.0 * 10.0).round() / 10.0
}

/// Relative-time label for the dashboard feeds.
///
/// Bands on the absolute offset: under an hour in minutes (floored to 1),
/// under a day in rounded hours, otherwise rounded days. Sign picks the
/// "in ..." / "... ago" phrasing.
pub fn format_relative_time(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_minutes = ((target - now).num_seconds() as f64 / 60.0).round() as i64;
    let abs_minutes = diff_minutes.abs();
    let future = diff_minutes >= 0;

    if abs_minutes < 60 {
        let value = abs_minutes.max(1);
        return if future {
            format!("in {value} min")
        } else {
            format!("{value} min ago")
        };
    }

    let hours = (abs_minutes as f64 / 60.0).round() as i64;
    if abs_minutes < 1440 {
        return if future {
            format!("in {hours} hrs")
        } else {
            format!("{hours} hrs ago")
        };
    }

    let days = (hours as f64 / 24.0).round() as i64;
    if future {
        format!("in {days} days")
    } else {
        format!("{days} days ago")
    }
}

/// One "continue learning" card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueLearning {
    pub id: i32,
    pub title: String,
    // TODO: derive from tracked syllabus progress once per-student progress
    // rows exist; until then every card reports 0.
    pub progress: u8,
    pub instructor: String,
    pub last_accessed: String,
    pub url: String,
    pub duration: String,
}

/// Joins the most recent `video_view` entries against the video records:
/// dedup by video id keeping the most recent occurrence, cap at five cards.
pub fn continue_learning(
    view_activities: &[Activity],
    videos: &[Video],
    now: DateTime<Utc>,
) -> Vec<ContinueLearning> {
    let mut seen = Vec::new();
    let mut cards = Vec::new();

    for activity in view_activities {
        let Some(video_id) = activity.resource_id else {
            continue;
        };
        if seen.contains(&video_id) {
            continue;
        }
        seen.push(video_id);

        let Some(video) = videos.iter().find(|v| v.id == video_id) else {
            continue;
        };
        cards.push(ContinueLearning {
            id: video.id,
            title: video.title.clone(),
            progress: 0,
            instructor: video.course.clone(),
            last_accessed: format_relative_time(activity.created_at, now),
            url: video.url.clone(),
            duration: video.duration.clone(),
        });
        if cards.len() == 5 {
            break;
        }
    }

    cards
}

/// Cold-start fallback: up to three published videos.
pub fn cold_start_suggestions(videos: &[Video]) -> Vec<ContinueLearning> {
    videos
        .iter()
        .filter(|v| v.status == "Published")
        .take(3)
        .map(|video| ContinueLearning {
            id: video.id,
            title: video.title.clone(),
            progress: 0,
            instructor: video.course.clone(),
            last_accessed: "Not started".to_string(),
            url: video.url.clone(),
            duration: video.duration.clone(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub id: usize,
    pub title: String,
    pub course: String,
    pub date: String,
    pub days_left: i64,
}

/// Dated syllabus items at or after `now`, in stored order, capped at four,
/// annotated with the ceiling of the day difference.
pub fn upcoming_deadlines(items: &[SyllabusItem], now: DateTime<Utc>) -> Vec<Deadline> {
    items
        .iter()
        .filter_map(|item| {
            let date = item.date?;
            let deadline = date.and_hms_opt(0, 0, 0)?.and_utc();
            if deadline < now {
                return None;
            }
            let days_left = ((deadline - now).num_seconds() as f64 / 86_400.0).ceil() as i64;
            Some((item, date, days_left))
        })
        .take(4)
        .enumerate()
        .map(|(idx, (item, date, days_left))| Deadline {
            id: idx + 1,
            title: item.topic.clone().unwrap_or_else(|| item.course_name.clone()),
            course: item.course_name.clone(),
            date: date.to_string(),
            days_left,
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTopic {
    pub id: i32,
    pub name: String,
    pub completed: bool,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    pub id: usize,
    pub course: String,
    pub topics: Vec<CourseTopic>,
}

/// Groups syllabus items by course name (first-seen course order), topics
/// within a course by date ascending with undated topics last.
pub fn syllabus_overview(items: &[SyllabusItem]) -> Vec<CourseOverview> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: BTreeMap<String, Vec<(Option<NaiveDate>, CourseTopic)>> = BTreeMap::new();

    for item in items {
        let course = item.course_name.clone();
        if !order.contains(&course) {
            order.push(course.clone());
        }
        let date = item.date.or_else(|| Some(item.updated_at.date_naive()));
        grouped.entry(course).or_default().push((
            date,
            CourseTopic {
                id: item.id,
                name: item.topic.clone().unwrap_or_else(|| item.course_name.clone()),
                completed: item.status == "Published",
                date: date.map(|d| d.to_string()),
            },
        ));
    }

    order
        .into_iter()
        .enumerate()
        .map(|(idx, course)| {
            let mut topics = grouped.remove(&course).unwrap_or_default();
            // Undated topics sink to the end; None sorts first in Option's
            // natural order, so compare through a max-date sentinel.
            topics.sort_by_key(|(date, _)| date.unwrap_or(NaiveDate::MAX));
            CourseOverview {
                id: idx + 1,
                course,
                topics: topics.into_iter().map(|(_, t)| t).collect(),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub icon: String,
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub resource_id: Option<i32>,
    pub resource_kind: Option<String>,
    pub metadata: serde_json::Value,
}

/// Maps raw ledger rows through the fixed icon/message table.
pub fn activity_feed(activities: &[Activity], now: DateTime<Utc>) -> Vec<FeedEntry> {
    activities
        .iter()
        .map(|activity| {
            let title = activity.resource_title.as_deref();
            let (icon, message) = match ActivityType::parse(&activity.activity_type) {
                Some(ActivityType::VideoView) => {
                    ("▶️", format!("Watched video: {}", title.unwrap_or("Video")))
                }
                Some(ActivityType::ResourceDownload) => (
                    "📥",
                    format!("Downloaded resource: {}", title.unwrap_or("Resource")),
                ),
                Some(ActivityType::SyllabusAccess) => (
                    "📚",
                    format!("Accessed syllabus: {}", title.unwrap_or("Syllabus")),
                ),
                Some(ActivityType::PlacementRegistration) => (
                    "💼",
                    format!("Registered for placement: {}", title.unwrap_or("Placement")),
                ),
                _ => ("📌", "Activity recorded".to_string()),
            };
            FeedEntry {
                id: activity.id,
                kind: activity.activity_type.clone(),
                message,
                icon: icon.to_string(),
                time: format_relative_time(activity.created_at, now),
                timestamp: activity.created_at,
                resource_id: activity.resource_id,
                resource_kind: activity.resource_kind.clone(),
                metadata: activity.metadata.clone(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Growth series
// ---------------------------------------------------------------------------

/// Ledger types that count a student as active in a month.
pub const STUDENT_GROWTH_TYPES: [ActivityType; 4] = [
    ActivityType::VideoView,
    ActivityType::ResourceDownload,
    ActivityType::SyllabusAccess,
    ActivityType::PlacementRegistration,
];

/// Ledger types that count a teacher as active in a month.
pub const TEACHER_GROWTH_TYPES: [ActivityType; 4] = [
    ActivityType::VideoUpload,
    ActivityType::ResourceUpload,
    ActivityType::SyllabusCreate,
    ActivityType::SyllabusUpdate,
];

/// A registration event, already shifted into local calendar time.
pub struct RegistrationSeed {
    pub is_student: bool,
    pub created_at: NaiveDateTime,
}

/// A ledger event, already shifted into local calendar time.
pub struct ActivitySeed {
    pub user_id: i32,
    pub activity_type: ActivityType,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentActivityCounts {
    pub video_views: u32,
    pub resource_downloads: u32,
    pub syllabus_access: u32,
    pub placement_registrations: u32,
    pub total_activity: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBreakdown {
    pub video_views: u32,
    pub resource_downloads: u32,
    pub syllabus_access: u32,
    pub placement_registrations: u32,
    pub total: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherActivityCounts {
    pub videos_uploaded: u32,
    pub resources_uploaded: u32,
    pub syllabus_created: u32,
    pub syllabus_updated: u32,
    pub total_activity: u32,
}

#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherBreakdown {
    pub videos_uploaded: u32,
    pub resources_uploaded: u32,
    pub syllabus_created: u32,
    pub syllabus_updated: u32,
    pub total: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGrowth {
    pub total: u32,
    pub new: u32,
    pub active: u32,
    pub activity: StudentActivityCounts,
    pub activity_breakdown: BTreeMap<String, StudentBreakdown>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherGrowth {
    pub total: u32,
    pub new: u32,
    pub active: u32,
    pub activity: TeacherActivityCounts,
    pub activity_breakdown: BTreeMap<String, TeacherBreakdown>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub month: String,
    pub date: String,
    pub students: StudentGrowth,
    pub teachers: TeacherGrowth,
}

/// First day of the month `offset_back` months before `now`'s month.
fn month_start(now: NaiveDateTime, offset_back: i32) -> NaiveDate {
    let mut year = now.year();
    let mut month = now.month() as i32 - offset_back;
    while month <= 0 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap_or(NaiveDate::MIN)
}

fn year_month(dt: NaiveDateTime) -> (i32, u32) {
    (dt.year(), dt.month())
}

/// Builds the trailing six-month growth series. Month boundaries are
/// `[firstOfMonth, firstOfNextMonth)` in the calendar of the inputs, which
/// the caller has already localized.
pub fn growth_series(
    now: NaiveDateTime,
    registrations: &[RegistrationSeed],
    student_activities: &[ActivitySeed],
    teacher_activities: &[ActivitySeed],
) -> Vec<GrowthPoint> {
    const MONTHS: i32 = 6;
    let mut series = Vec::with_capacity(MONTHS as usize);

    for i in (0..MONTHS).rev() {
        let start = month_start(now, i);
        let bucket = (start.year(), start.month());

        let mut students_total = 0u32;
        let mut students_new = 0u32;
        let mut teachers_total = 0u32;
        let mut teachers_new = 0u32;
        for reg in registrations {
            let reg_month = year_month(reg.created_at);
            if reg_month <= bucket {
                if reg.is_student {
                    students_total += 1;
                } else {
                    teachers_total += 1;
                }
                if reg_month == bucket {
                    if reg.is_student {
                        students_new += 1;
                    } else {
                        teachers_new += 1;
                    }
                }
            }
        }

        let mut student_counts = StudentActivityCounts::default();
        let mut student_breakdown: BTreeMap<String, StudentBreakdown> = BTreeMap::new();
        for seed in student_activities {
            if year_month(seed.created_at) != bucket {
                continue;
            }
            student_counts.total_activity += 1;
            let per_user = student_breakdown.entry(seed.user_id.to_string()).or_default();
            per_user.total += 1;
            match seed.activity_type {
                ActivityType::VideoView => {
                    student_counts.video_views += 1;
                    per_user.video_views += 1;
                }
                ActivityType::ResourceDownload => {
                    student_counts.resource_downloads += 1;
                    per_user.resource_downloads += 1;
                }
                ActivityType::SyllabusAccess => {
                    student_counts.syllabus_access += 1;
                    per_user.syllabus_access += 1;
                }
                ActivityType::PlacementRegistration => {
                    student_counts.placement_registrations += 1;
                    per_user.placement_registrations += 1;
                }
                _ => {}
            }
        }

        let mut teacher_counts = TeacherActivityCounts::default();
        let mut teacher_breakdown: BTreeMap<String, TeacherBreakdown> = BTreeMap::new();
        for seed in teacher_activities {
            if year_month(seed.created_at) != bucket {
                continue;
            }
            teacher_counts.total_activity += 1;
            let per_user = teacher_breakdown.entry(seed.user_id.to_string()).or_default();
            per_user.total += 1;
            match seed.activity_type {
                ActivityType::VideoUpload => {
                    teacher_counts.videos_uploaded += 1;
                    per_user.videos_uploaded += 1;
                }
                ActivityType::ResourceUpload => {
                    teacher_counts.resources_uploaded += 1;
                    per_user.resources_uploaded += 1;
                }
                ActivityType::SyllabusCreate => {
                    teacher_counts.syllabus_created += 1;
                    per_user.syllabus_created += 1;
                }
                ActivityType::SyllabusUpdate => {
                    teacher_counts.syllabus_updated += 1;
                    per_user.syllabus_updated += 1;
                }
                _ => {}
            }
        }

        series.push(GrowthPoint {
            month: start.format("%b %Y").to_string(),
            date: start.to_string(),
            students: StudentGrowth {
                total: students_total,
                new: students_new,
                active: student_breakdown.len() as u32,
                activity: student_counts,
                activity_breakdown: student_breakdown,
            },
            teachers: TeacherGrowth {
                total: teachers_total,
                new: teachers_new,
                active: teacher_breakdown.len() as u32,
                activity: teacher_counts,
                activity_breakdown: teacher_breakdown,
            },
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .expect("valid test timestamp")
            .and_utc()
    }

    fn video(id: i32, title: &str, duration: &str, status: &str) -> Video {
        Video {
            id,
            title: title.to_string(),
            description: String::new(),
            duration: duration.to_string(),
            course: "CS101".to_string(),
            views: 0,
            upload_date: utc("2024-01-01 00:00:00"),
            url: format!("https://videos.example/{id}"),
            status: status.to_string(),
            created_at: utc("2024-01-01 00:00:00"),
        }
    }

    fn view_activity(id: i64, video_id: i32, created_at: DateTime<Utc>) -> Activity {
        Activity {
            id,
            user_id: 7,
            user_role: "student".to_string(),
            activity_type: "video_view".to_string(),
            resource_id: Some(video_id),
            resource_kind: Some("Video".to_string()),
            resource_title: Some(format!("Video {video_id}")),
            metadata: serde_json::json!({}),
            created_at,
        }
    }

    fn syllabus_item(
        id: i32,
        course: &str,
        topic: &str,
        date: Option<&str>,
        status: &str,
    ) -> SyllabusItem {
        SyllabusItem {
            id,
            course_id: "C1".to_string(),
            course_name: course.to_string(),
            semester: 4,
            academic_year: "2024-25".to_string(),
            topic: Some(topic.to_string()),
            date: date.map(|d| d.parse().expect("valid test date")),
            ia_syllabus: Vec::new(),
            semester_syllabus: Vec::new(),
            materials: Vec::new(),
            created_by: None,
            status: status.to_string(),
            created_at: utc("2024-01-01 00:00:00"),
            updated_at: utc("2024-01-01 00:00:00"),
        }
    }

    #[test]
    fn parses_all_duration_shapes() {
        assert_eq!(parse_duration_minutes("1:30:00"), 90.0);
        assert_eq!(parse_duration_minutes("10:00"), 10.0);
        assert_eq!(parse_duration_minutes("15:30"), 15.5);
        assert_eq!(parse_duration_minutes("45"), 45.0);
        assert_eq!(parse_duration_minutes("abc"), 0.0);
        assert_eq!(parse_duration_minutes("1:xx:00"), 0.0);
        assert_eq!(parse_duration_minutes(""), 0.0);
    }

    #[test]
    fn study_hours_rounds_to_one_decimal() {
        // 10:00 + 1:30:00 watched = 100 minutes = 1.666..h -> 1.7
        let total = parse_duration_minutes("10:00") + parse_duration_minutes("1:30:00");
        assert_eq!(study_hours(total), 1.7);
        assert_eq!(study_hours(0.0), 0.0);
        assert_eq!(study_hours(60.0), 1.0);
    }

    #[test]
    fn relative_time_ninety_minutes_past_rounds_to_two_hours() {
        let now = utc("2024-01-01 00:00:00");
        let target = now - chrono::Duration::minutes(90);
        assert_eq!(format_relative_time(target, now), "2 hrs ago");
    }

    #[test]
    fn relative_time_thirty_seconds_future_floors_to_one_minute() {
        let now = utc("2024-01-01 00:00:00");
        let target = now + chrono::Duration::seconds(30);
        assert_eq!(format_relative_time(target, now), "in 1 min");
    }

    #[test]
    fn relative_time_minute_and_day_bands() {
        let now = utc("2024-01-01 00:00:00");
        assert_eq!(
            format_relative_time(now - chrono::Duration::minutes(5), now),
            "5 min ago"
        );
        assert_eq!(
            format_relative_time(now + chrono::Duration::hours(5), now),
            "in 5 hrs"
        );
        assert_eq!(
            format_relative_time(now - chrono::Duration::days(3), now),
            "3 days ago"
        );
    }

    #[test]
    fn continue_learning_dedupes_and_keeps_recency_order() {
        let now = utc("2024-03-01 12:00:00");
        let videos = vec![
            video(1, "Sorting", "10:00", "Published"),
            video(2, "Graphs", "20:00", "Published"),
        ];
        // Newest first: video 2, then 1, then a repeat of 2.
        let activities = vec![
            view_activity(30, 2, now - chrono::Duration::minutes(5)),
            view_activity(29, 1, now - chrono::Duration::minutes(30)),
            view_activity(28, 2, now - chrono::Duration::hours(2)),
        ];

        let cards = continue_learning(&activities, &videos, now);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, 2);
        assert_eq!(cards[0].last_accessed, "5 min ago");
        assert_eq!(cards[1].id, 1);
        assert_eq!(cards[1].progress, 0);
    }

    #[test]
    fn continue_learning_caps_at_five_cards() {
        let now = utc("2024-03-01 12:00:00");
        let videos: Vec<Video> = (1..=8).map(|i| video(i, "V", "5:00", "Published")).collect();
        let activities: Vec<Activity> = (1..=8)
            .map(|i| view_activity(i as i64, i, now - chrono::Duration::minutes(i as i64)))
            .collect();
        assert_eq!(continue_learning(&activities, &videos, now).len(), 5);
    }

    #[test]
    fn cold_start_takes_up_to_three_published() {
        let videos = vec![
            video(1, "A", "5:00", "Published"),
            video(2, "B", "5:00", "Draft"),
            video(3, "C", "5:00", "Published"),
            video(4, "D", "5:00", "Published"),
            video(5, "E", "5:00", "Published"),
        ];
        let cards = cold_start_suggestions(&videos);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].id, 1);
        assert_eq!(cards[1].id, 3);
        assert_eq!(cards[0].last_accessed, "Not started");
    }

    #[test]
    fn deadlines_skip_past_items_and_cap_at_four() {
        let now = utc("2024-03-10 08:00:00");
        let items = vec![
            syllabus_item(1, "Math", "Limits", Some("2024-03-01"), "Draft"),
            syllabus_item(2, "Math", "Series", Some("2024-03-12"), "Draft"),
            syllabus_item(3, "Math", "Integrals", Some("2024-03-14"), "Draft"),
            syllabus_item(4, "Math", "Vectors", Some("2024-03-16"), "Draft"),
            syllabus_item(5, "Math", "Matrices", Some("2024-03-18"), "Draft"),
            syllabus_item(6, "Math", "Tensors", Some("2024-03-20"), "Draft"),
            syllabus_item(7, "Math", "Undated", None, "Draft"),
        ];

        let deadlines = upcoming_deadlines(&items, now);
        assert_eq!(deadlines.len(), 4);
        assert_eq!(deadlines[0].title, "Series");
        // 2024-03-12T00:00 is 1 day 16 hours out -> ceil 2 days.
        assert_eq!(deadlines[0].days_left, 2);
        assert_eq!(deadlines[3].title, "Vectors");
    }

    #[test]
    fn syllabus_overview_groups_by_course_and_sorts_undated_last() {
        let items = vec![
            syllabus_item(1, "Math", "Algebra", Some("2024-04-10"), "Published"),
            syllabus_item(2, "Math", "Calculus", Some("2024-03-01"), "Draft"),
            syllabus_item(3, "Physics", "Optics", Some("2024-02-01"), "Published"),
        ];

        let overview = syllabus_overview(&items);
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].course, "Math");
        assert_eq!(overview[0].topics.len(), 2);
        assert_eq!(overview[0].topics[0].name, "Calculus");
        assert!(!overview[0].topics[0].completed);
        assert_eq!(overview[0].topics[1].name, "Algebra");
        assert!(overview[0].topics[1].completed);
        assert_eq!(overview[1].course, "Physics");
        assert_eq!(overview[1].topics.len(), 1);
    }

    #[test]
    fn draft_records_stay_visible_to_the_dashboard() {
        let now = utc("2024-03-10 08:00:00");
        let items = vec![
            syllabus_item(1, "Math", "Series", Some("2024-03-12"), "Draft"),
            syllabus_item(2, "Math", "Limits", Some("2024-03-14"), "Published"),
        ];

        // Draft deadlines are still deadlines.
        let deadlines = upcoming_deadlines(&items, now);
        assert_eq!(deadlines.len(), 2);
        assert_eq!(deadlines[0].title, "Series");

        // And the overview's completed flag distinguishes the statuses.
        let overview = syllabus_overview(&items);
        assert!(!overview[0].topics[0].completed);
        assert!(overview[0].topics[1].completed);

        // Continue-learning joins against the full catalog, drafts included.
        let videos = vec![video(1, "Unreleased", "10:00", "Draft")];
        let activities = vec![view_activity(1, 1, now - chrono::Duration::minutes(5))];
        let cards = continue_learning(&activities, &videos, now);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Unreleased");
    }

    #[test]
    fn activity_feed_uses_the_fixed_message_table() {
        let now = utc("2024-03-01 12:00:00");
        let mut download = view_activity(2, 4, now - chrono::Duration::minutes(10));
        download.activity_type = "resource_download".to_string();
        download.resource_title = Some("Lecture Notes".to_string());
        let mut unknown = view_activity(3, 4, now - chrono::Duration::minutes(20));
        unknown.activity_type = "login".to_string();

        let feed = activity_feed(
            &[
                view_activity(1, 9, now - chrono::Duration::minutes(5)),
                download,
                unknown,
            ],
            now,
        );

        assert_eq!(feed[0].message, "Watched video: Video 9");
        assert_eq!(feed[0].icon, "▶️");
        assert_eq!(feed[0].time, "5 min ago");
        assert_eq!(feed[1].message, "Downloaded resource: Lecture Notes");
        assert_eq!(feed[2].message, "Activity recorded");
        assert_eq!(feed[2].icon, "📌");
    }

    fn naive(s: &str) -> NaiveDateTime {
        s.parse().expect("valid test datetime")
    }

    #[test]
    fn growth_series_buckets_by_calendar_month() {
        let now = naive("2024-06-15T10:00:00");
        let registrations = vec![
            RegistrationSeed { is_student: true, created_at: naive("2024-01-05T00:00:00") },
            RegistrationSeed { is_student: true, created_at: naive("2024-05-20T00:00:00") },
            RegistrationSeed { is_student: false, created_at: naive("2024-06-01T00:00:00") },
        ];
        let student_activities = vec![
            ActivitySeed {
                user_id: 1,
                activity_type: ActivityType::VideoView,
                created_at: naive("2024-05-02T09:00:00"),
            },
            ActivitySeed {
                user_id: 1,
                activity_type: ActivityType::ResourceDownload,
                created_at: naive("2024-05-03T09:00:00"),
            },
            ActivitySeed {
                user_id: 2,
                activity_type: ActivityType::VideoView,
                created_at: naive("2024-06-10T09:00:00"),
            },
        ];

        let series = growth_series(now, &registrations, &student_activities, &[]);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "Jan 2024");
        assert_eq!(series[5].month, "Jun 2024");

        // January: one cumulative student, newly registered that month.
        assert_eq!(series[0].students.total, 1);
        assert_eq!(series[0].students.new, 1);

        // May: second student joins; one active student with two actions.
        let may = &series[4];
        assert_eq!(may.students.total, 2);
        assert_eq!(may.students.new, 1);
        assert_eq!(may.students.active, 1);
        assert_eq!(may.students.activity.video_views, 1);
        assert_eq!(may.students.activity.resource_downloads, 1);
        assert_eq!(may.students.activity.total_activity, 2);
        assert_eq!(may.students.activity_breakdown["1"].total, 2);

        // June: teacher registration lands, one active student.
        let june = &series[5];
        assert_eq!(june.teachers.total, 1);
        assert_eq!(june.teachers.new, 1);
        assert_eq!(june.students.active, 1);
        assert_eq!(june.students.activity_breakdown["2"].video_views, 1);
    }

    #[test]
    fn growth_series_crosses_year_boundaries() {
        let now = naive("2024-02-10T00:00:00");
        let series = growth_series(now, &[], &[], &[]);
        assert_eq!(series[0].month, "Sep 2023");
        assert_eq!(series[5].month, "Feb 2024");
    }
}
