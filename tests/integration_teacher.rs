//! Exams, grades and attendance as seen by teachers, plus the login flow.
//! Needs a Postgres server reachable through `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use bridgeschool::modules::attendance::service::AttendanceService;
use bridgeschool::modules::classes::service::ClassService;
use bridgeschool::modules::courses::service::CourseService;
use bridgeschool::modules::exams::service::ExamService;
use bridgeschool::modules::grades::service::GradeService;
use bridgeschool_auth::Role;
use bridgeschool_core::ErrorKind;
use bridgeschool_models::attendance::{
    AttendanceEntry, AttendanceStatus, ClassAttendanceDto, RecordAttendanceDto,
};
use bridgeschool_models::courses::CourseAssignment;
use bridgeschool_models::exams::{CreateExamDto, Exam};
use bridgeschool_models::grades::RecordGradeDto;
use bridgeschool_models::users::User;
use bridgeschool_models::{ExamId, StudentId};
use chrono::NaiveDate;
use common::{
    Campus, create_campus, create_student, create_user, db_app, enroll, get, json_request, send,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;

struct Classroom {
    campus: Campus,
    teacher: User,
    student: StudentId,
}

/// Campus whose course is taught by a fresh teacher to its one class, with
/// a single enrolled student.
async fn classroom(pool: &PgPool) -> Classroom {
    let campus = create_campus(pool).await;
    let teacher = create_user(pool, Role::Teacher, Some(campus.branch_id)).await;
    CourseService::assign_course(
        pool,
        campus.course_id,
        &[CourseAssignment {
            class_id: campus.class_id,
            teacher_id: Some(teacher.id),
        }],
    )
    .await
    .unwrap();
    let student = create_student(pool, campus.branch_id, "Amaka").await;
    enroll(pool, student, campus.class_id).await;

    Classroom {
        campus,
        teacher,
        student,
    }
}

async fn exam(pool: &PgPool, room: &Classroom, max_marks: i32) -> Exam {
    ExamService::create_exam(
        pool,
        room.teacher.id,
        CreateExamDto {
            name: "Midterm".to_string(),
            max_marks,
            date: day(),
            course_id: room.campus.course_id,
            session_id: room.campus.session_id,
        },
    )
    .await
    .unwrap()
}

fn grade(exam_id: ExamId, student_id: StudentId, marks_obtained: i32) -> RecordGradeDto {
    RecordGradeDto {
        exam_id,
        student_id,
        marks_obtained,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unassigned_teacher_cannot_create_exam(pool: PgPool) {
    let room = classroom(&pool).await;
    let outsider = create_user(&pool, Role::Teacher, Some(room.campus.branch_id)).await;

    let err = ExamService::create_exam(
        &pool,
        outsider.id,
        CreateExamDto {
            name: "Quiz".to_string(),
            max_marks: 10,
            date: day(),
            course_id: room.campus.course_id,
            session_id: room.campus.session_id,
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::Forbidden));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_bounds_and_uniqueness(pool: PgPool) {
    let room = classroom(&pool).await;
    let exam = exam(&pool, &room, 50).await;

    let err = GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, room.student, 51))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Unprocessable));
    assert_eq!(err.to_string(), "marks_obtained must be between 0 and 50");

    let recorded =
        GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, room.student, 50))
            .await
            .unwrap();
    assert_eq!(recorded.marks_obtained, 50);

    let err = GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, room.student, 40))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let updated =
        GradeService::update_grade(&pool, room.teacher.id, grade(exam.id, room.student, 42))
            .await
            .unwrap();
    assert_eq!(updated.id, recorded.id);
    assert_eq!(updated.marks_obtained, 42);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_requires_student_taking_course(pool: PgPool) {
    let room = classroom(&pool).await;
    let exam = exam(&pool, &room, 20).await;
    let unenrolled = create_student(&pool, room.campus.branch_id, "Obi").await;

    let err = GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, unenrolled, 5))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BadRequest));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_grade_is_not_found(pool: PgPool) {
    let room = classroom(&pool).await;
    let exam = exam(&pool, &room, 20).await;

    let err = GradeService::update_grade(&pool, room.teacher.id, grade(exam.id, room.student, 5))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gradebook_lists_roster_with_marks(pool: PgPool) {
    let room = classroom(&pool).await;
    let exam = exam(&pool, &room, 100).await;
    let second = create_student(&pool, room.campus.branch_id, "Bisi").await;
    enroll(&pool, second, room.campus.class_id).await;
    GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, room.student, 88))
        .await
        .unwrap();

    let book = GradeService::get_gradebook(&pool, room.teacher.id, room.campus.course_id)
        .await
        .unwrap();

    assert_eq!(book.exams.len(), 1);
    let names: Vec<&str> = book.students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Amaka", "Bisi"]);
    assert_eq!(book.students[0].grades.len(), 1);
    assert_eq!(book.students[0].grades[0].marks_obtained, 88);
    assert!(book.students[1].grades.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_exam_removes_grades(pool: PgPool) {
    let room = classroom(&pool).await;
    let exam = exam(&pool, &room, 10).await;
    GradeService::record_grade(&pool, room.teacher.id, grade(exam.id, room.student, 7))
        .await
        .unwrap();

    ExamService::delete_exam(&pool, room.teacher.id, exam.id)
        .await
        .unwrap();

    let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grades")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(left, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attendance_once_per_day(pool: PgPool) {
    let room = classroom(&pool).await;
    let dto = |status| RecordAttendanceDto {
        class_id: room.campus.class_id,
        student_id: room.student,
        date: day(),
        status,
    };

    let record =
        AttendanceService::record_attendance(&pool, room.teacher.id, dto(AttendanceStatus::Present))
            .await
            .unwrap();
    assert_eq!(record.teacher_id, Some(room.teacher.id));

    let err =
        AttendanceService::record_attendance(&pool, room.teacher.id, dto(AttendanceStatus::Absent))
            .await
            .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let listed =
        AttendanceService::get_attendance(&pool, room.teacher.id, room.campus.class_id, Some(day()))
            .await
            .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, AttendanceStatus::Present);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_homeroom_teacher_may_take_attendance(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let homeroom = create_user(&pool, Role::Teacher, Some(campus.branch_id)).await;
    let stranger = create_user(&pool, Role::Teacher, Some(campus.branch_id)).await;
    ClassService::assign_homeroom_teacher(&pool, campus.class_id, homeroom.id)
        .await
        .unwrap();
    let student = create_student(&pool, campus.branch_id, "Dayo").await;
    enroll(&pool, student, campus.class_id).await;

    let dto = || RecordAttendanceDto {
        class_id: campus.class_id,
        student_id: student,
        date: day(),
        status: AttendanceStatus::Present,
    };

    let err = AttendanceService::record_attendance(&pool, stranger.id, dto())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Forbidden));

    AttendanceService::record_attendance(&pool, homeroom.id, dto())
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_attendance_batch_is_atomic(pool: PgPool) {
    let room = classroom(&pool).await;
    let unenrolled = create_student(&pool, room.campus.branch_id, "Efe").await;

    let err = AttendanceService::record_class_attendance(
        &pool,
        room.teacher.id,
        ClassAttendanceDto {
            class_id: room.campus.class_id,
            date: day(),
            records: vec![
                AttendanceEntry {
                    student_id: room.student,
                    status: AttendanceStatus::Present,
                },
                AttendanceEntry {
                    student_id: unenrolled,
                    status: AttendanceStatus::Absent,
                },
            ],
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BadRequest));

    let recorded =
        AttendanceService::get_attendance(&pool, room.teacher.id, room.campus.class_id, None)
            .await
            .unwrap();
    assert!(recorded.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_then_call_teacher_route(pool: PgPool) {
    let room = classroom(&pool).await;
    let app = db_app(pool.clone());

    let (response, body) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": room.teacher.email.to_uppercase(), "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "teacher");
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let (response, body) = send(
        app,
        get("/api/v1/teacher/courses", Some(&access_token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_wrong_password_is_unauthorized(pool: PgPool) {
    let teacher = create_user(&pool, Role::Teacher, None).await;

    let (response, body) = send(
        db_app(pool),
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": teacher.email, "password": "not-the-password" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_branch_over_http(pool: PgPool) {
    let admin = create_user(&pool, Role::SuperAdmin, None).await;
    let token = token_for(&admin);

    let (response, body) = send(
        db_app(pool),
        json_request(
            "POST",
            "/api/v1/super_admin/branches",
            Some(&token),
            json!({ "name": "Lekki Campus", "address": "12 Admiralty Way" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body["name"], "Lekki Campus");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exam_session_must_match_course(pool: PgPool) {
    let room = classroom(&pool).await;
    let other = create_campus(&pool).await;

    let err = ExamService::create_exam(
        &pool,
        room.teacher.id,
        CreateExamDto {
            name: "Final".to_string(),
            max_marks: 100,
            date: day(),
            course_id: room.campus.course_id,
            session_id: other.session_id,
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BadRequest));

    let kept = exam(&pool, &room, 100).await;
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(other.session_id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(ExamService::get_exam(&pool, kept.id).await.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_unknown_email_is_unauthorized(pool: PgPool) {
    let (response, body) = send(
        db_app(pool),
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "nobody@bridge.test", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_matches_mixed_case_stored_email(pool: PgPool) {
    let hash = bridgeschool_core::hash_password("password123").unwrap();
    sqlx::query(
        r#"INSERT INTO users (email, password, first_name, last_name, role)
           VALUES ('Mixed.Case@Bridge.Test', $1, 'Ngozi', 'Eze', 'teacher')"#,
    )
    .bind(&hash)
    .execute(&pool)
    .await
    .unwrap();

    let (response, body) = send(
        db_app(pool),
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "mixed.case@bridge.test", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body["user"]["first_name"], "Ngozi");
}
