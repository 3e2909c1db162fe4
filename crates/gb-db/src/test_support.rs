//! Shared fixtures for gb-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use gb_core::entities::Course;
    use gb_core::enums::{Role, Semester};
    use gb_core::notice::RegistrarNotice;
    use gb_registrar::RegistrarHandle;
    use tokio::sync::mpsc;

    use crate::GradebookDb;
    use crate::repos::assignment;
    use crate::roster::{Roster, RosterEnrollment, RosterSection, RosterTerm, RosterUser};
    use crate::service::GradebookService;

    pub const TED: &str = "ted@csumb.edu";
    pub const TEDDY: &str = "teddy@csumb.edu";
    pub const SAM: &str = "sam@csumb.edu";

    /// Enrolled in `SECTION_NO`, alphabetical by name.
    pub const STUDENTS: [(&str, &str); 3] = [
        ("abe", "abe@csumb.edu"),
        ("sam", SAM),
        ("samantha", "samantha@csumb.edu"),
    ];

    /// Taught by `TED`.
    pub const SECTION_NO: i64 = 1;
    /// Taught by `TEDDY`, same term.
    pub const OTHER_SECTION_NO: i64 = 2;
    /// The one assignment seeded in `SECTION_NO`.
    pub const ASSIGNMENT_ID: i64 = 1;

    pub struct Fixture {
        pub svc: GradebookService,
        pub notices: mpsc::Receiver<RegistrarNotice>,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Fall 2025, two courses, two instructors, three students.
    pub fn scenario_roster() -> Roster {
        let mut users = vec![
            RosterUser {
                name: "ted".into(),
                email: TED.into(),
                role: Role::Instructor,
            },
            RosterUser {
                name: "teddy".into(),
                email: TEDDY.into(),
                role: Role::Instructor,
            },
        ];
        users.extend(STUDENTS.iter().map(|(name, email)| RosterUser {
            name: (*name).into(),
            email: (*email).into(),
            role: Role::Student,
        }));

        let mut enrollments: Vec<_> = STUDENTS
            .iter()
            .map(|(_, email)| RosterEnrollment {
                section_no: SECTION_NO,
                student_email: (*email).into(),
                grade: None,
            })
            .collect();
        enrollments.push(RosterEnrollment {
            section_no: OTHER_SECTION_NO,
            student_email: SAM.into(),
            grade: None,
        });

        Roster {
            terms: vec![RosterTerm {
                year: 2025,
                semester: Semester::Fall,
                start_date: date(2025, 9, 1),
                end_date: date(2025, 12, 15),
            }],
            courses: vec![
                Course {
                    course_id: "cst438".into(),
                    title: "Software Engineering".into(),
                    credits: 4,
                },
                Course {
                    course_id: "cst363".into(),
                    title: "Introduction to Database".into(),
                    credits: 4,
                },
            ],
            users,
            sections: vec![
                RosterSection {
                    section_no: SECTION_NO,
                    course_id: "cst438".into(),
                    year: 2025,
                    semester: Semester::Fall,
                    sec_id: 1,
                    building: Some("052".into()),
                    room: Some("104".into()),
                    times: Some("M W 10:00-11:50".into()),
                    instructor_email: TED.into(),
                },
                RosterSection {
                    section_no: OTHER_SECTION_NO,
                    course_id: "cst363".into(),
                    year: 2025,
                    semester: Semester::Fall,
                    sec_id: 1,
                    building: None,
                    room: None,
                    times: None,
                    instructor_email: TEDDY.into(),
                },
            ],
            enrollments,
        }
    }

    /// In-memory service with nothing imported.
    pub async fn empty_service() -> (GradebookService, mpsc::Receiver<RegistrarNotice>) {
        empty_service_with_capacity(64).await
    }

    async fn empty_service_with_capacity(
        capacity: usize,
    ) -> (GradebookService, mpsc::Receiver<RegistrarNotice>) {
        let db = GradebookDb::open_local(":memory:").await.unwrap();
        let (handle, rx) = RegistrarHandle::channel(capacity);
        (GradebookService::from_db(db, handle), rx)
    }

    pub async fn scenario() -> Fixture {
        scenario_with_capacity(64).await
    }

    /// The standard scenario with a notice queue of `capacity` slots.
    pub async fn scenario_with_capacity(capacity: usize) -> Fixture {
        let (svc, notices) = empty_service_with_capacity(capacity).await;
        svc.import_roster(&scenario_roster()).await.unwrap();
        {
            let conn = svc.db().conn().await;
            let seeded =
                assignment::insert_assignment(&conn, SECTION_NO, "Project 1", date(2025, 10, 15))
                    .await
                    .unwrap();
            assert_eq!(seeded.id, ASSIGNMENT_ID);
        }
        Fixture { svc, notices }
    }
}
