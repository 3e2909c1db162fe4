//! On-disk store: roster import, a grading session, and a reopen.

use gb_core::enums::{AuditAction, EntityKind, Semester};
use gb_core::identity::CallerIdentity;
use gb_core::requests::{CreateAssignment, EnrollmentGradeUpdate, GradeScoreUpdate};
use gb_db::GradebookService;
use gb_db::repos::audit::AuditFilter;
use gb_db::roster::Roster;
use gb_registrar::RegistrarHandle;
use pretty_assertions::assert_eq;
use serde_json::json;

const TED: &str = "ted@csumb.edu";

fn roster() -> Roster {
    serde_json::from_value(json!({
        "terms": [
            {"year": 2025, "semester": "Fall", "start_date": "2025-09-01", "end_date": "2025-12-15"}
        ],
        "courses": [{"course_id": "cst438", "title": "Software Engineering", "credits": 4}],
        "users": [
            {"name": "ted", "email": TED, "role": "instructor"},
            {"name": "sam", "email": "sam@csumb.edu", "role": "student"},
            {"name": "samantha", "email": "samantha@csumb.edu", "role": "student"}
        ],
        "sections": [
            {"section_no": 1, "course_id": "cst438", "year": 2025, "semester": "Fall",
             "sec_id": 1, "instructor_email": TED}
        ],
        "enrollments": [
            {"section_no": 1, "student_email": "sam@csumb.edu", "grade": "B"},
            {"section_no": 1, "student_email": "samantha@csumb.edu"}
        ]
    }))
    .unwrap()
}

async fn open(path: &str) -> (GradebookService, tokio::sync::mpsc::Receiver<gb_core::notice::RegistrarNotice>) {
    let (handle, rx) = RegistrarHandle::channel(16);
    (GradebookService::new_local(path, handle).await.unwrap(), rx)
}

#[tokio::test]
async fn grading_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradebook.db");
    let path = path.to_str().unwrap();
    let ted = CallerIdentity::instructor(TED);

    let assignment_id = {
        let (svc, mut notices) = open(path).await;
        let summary = svc.import_roster(&roster()).await.unwrap();
        assert_eq!(summary.enrollments_created, 2);

        let created = svc
            .create_assignment(
                &ted,
                &CreateAssignment {
                    title: "Midterm".into(),
                    due_date: "2025-10-20".into(),
                    sec_no: 1,
                    course_id: Some("cst438".into()),
                    sec_id: Some(1),
                },
            )
            .await
            .unwrap();

        let grades = svc.list_grades(&ted, created.id).await.unwrap();
        let updates: Vec<_> = grades
            .iter()
            .map(|g| GradeScoreUpdate {
                grade_id: g.grade_id,
                score: Some(80),
            })
            .collect();
        svc.update_grades(&ted, &updates).await.unwrap();

        let enrollments = svc.list_enrollments(&ted, 1).await.unwrap();
        assert_eq!(enrollments[0].grade.as_deref(), Some("B"));
        svc.update_enrollment_grades(
            &ted,
            &[EnrollmentGradeUpdate {
                enrollment_id: enrollments[1].enrollment_id,
                grade: Some("A-".into()),
            }],
        )
        .await
        .unwrap();
        assert_eq!(notices.recv().await.unwrap().payload.grade.as_deref(), Some("A-"));

        created.id
    };

    let (svc, _notices) = open(path).await;
    let grades = svc.list_grades(&ted, assignment_id).await.unwrap();
    assert_eq!(grades.len(), 2);
    assert!(grades.iter().all(|g| g.score == Some(80)));

    let sections = svc.list_sections(&ted, 2025, Semester::Fall).await.unwrap();
    assert_eq!(sections.len(), 1);

    let scored = svc
        .query_audit(&AuditFilter {
            entity: Some(EntityKind::Grade),
            action: Some(AuditAction::ScoreChanged),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(scored.len(), 2);
    assert!(scored.iter().all(|row| row.actor_email == TED));

    let reimport = svc.import_roster(&roster()).await.unwrap();
    assert_eq!(reimport.enrollments_created, 0);
    let enrollments = svc.list_enrollments(&ted, 1).await.unwrap();
    assert_eq!(enrollments[1].grade.as_deref(), Some("A-"));
}
