use bridgeschool_auth::{Claims, Role};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, ClassAttendanceDto, RecordAttendanceDto,
};
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::branches::model::{Branch, CreateBranchDto, UpdateBranchDto};
use crate::modules::classes::model::{
    AssignHomeroomTeacherDto, Class, ClassStudent, ClassSummary, ClassWithDetails, CreateClassDto,
};
use crate::modules::courses::model::{
    AssignCourseDto, Course, CourseAssignment, CourseAssignmentsResponse, CreateCourseDto,
    TeacherCourse,
};
use crate::modules::enrollments::model::{
    EnrollStudentDto, Enrollment, PromoteStudentsDto, PromotionResponse, StudentStatus,
    UpdateEnrollmentDto,
};
use crate::modules::exams::model::{CreateExamDto, Exam};
use crate::modules::grades::model::{
    Grade, GradeEntry, GradeWithStudent, Gradebook, GradebookStudent, RecordGradeDto,
};
use crate::modules::sessions::model::{CreateSessionDto, Session};
use crate::modules::students::model::{CreateStudentDto, Student, StudentWithClass};
use crate::modules::users::model::{
    BulkDeleteUsersDto, CreateUserDto, DeletedResponse, TeacherDetails, User,
};
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::admin_me,
        crate::modules::auth::controller::teacher_me,
        crate::modules::branches::controller::get_branches,
        crate::modules::branches::controller::get_branch,
        crate::modules::branches::controller::create_branch,
        crate::modules::branches::controller::update_branch,
        crate::modules::branches::controller::delete_branch,
        crate::modules::sessions::controller::create_session,
        crate::modules::sessions::controller::get_sessions,
        crate::modules::sessions::controller::delete_session,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::assign_homeroom_teacher,
        crate::modules::classes::controller::get_class_students,
        crate::modules::classes::controller::delete_class,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::get_course_assignments,
        crate::modules::courses::controller::assign_course,
        crate::modules::courses::controller::get_my_courses,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_teachers,
        crate::modules::users::controller::get_teacher_details,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::bulk_delete_users,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::delete_student,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::update_enrollment,
        crate::modules::enrollments::controller::promote_students,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::get_exams,
        crate::modules::exams::controller::delete_exam,
        crate::modules::grades::controller::record_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_gradebook,
        crate::modules::attendance::controller::record_attendance,
        crate::modules::attendance::controller::record_class_attendance,
        crate::modules::attendance::controller::get_attendance,
    ),
    components(
        schemas(
            Claims,
            Role,
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            Branch,
            CreateBranchDto,
            UpdateBranchDto,
            Session,
            CreateSessionDto,
            Class,
            ClassWithDetails,
            ClassSummary,
            ClassStudent,
            CreateClassDto,
            AssignHomeroomTeacherDto,
            Course,
            CreateCourseDto,
            CourseAssignment,
            AssignCourseDto,
            CourseAssignmentsResponse,
            TeacherCourse,
            User,
            CreateUserDto,
            BulkDeleteUsersDto,
            DeletedResponse,
            TeacherDetails,
            Student,
            StudentWithClass,
            CreateStudentDto,
            StudentStatus,
            Enrollment,
            EnrollStudentDto,
            UpdateEnrollmentDto,
            PromoteStudentsDto,
            PromotionResponse,
            Exam,
            CreateExamDto,
            Grade,
            GradeWithStudent,
            RecordGradeDto,
            GradeEntry,
            GradebookStudent,
            Gradebook,
            AttendanceStatus,
            AttendanceRecord,
            RecordAttendanceDto,
            AttendanceEntry,
            ClassAttendanceDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and caller identity"),
        (name = "Branches", description = "School branches"),
        (name = "Sessions", description = "Academic sessions of a branch"),
        (name = "Classes", description = "Classes, homeroom teachers and class rosters"),
        (name = "Courses", description = "Courses and their class/teacher assignments"),
        (name = "Users", description = "Staff accounts"),
        (name = "Students", description = "Student records"),
        (name = "Enrollments", description = "Student enrollment and promotion"),
        (name = "Teacher", description = "Exams, grades and attendance for teachers")
    ),
    info(
        title = "The Bridge School API",
        version = "0.1.0",
        description = "School administration backend: branches, sessions, classes, courses, staff, students, exams, grades and attendance.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_guarded_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/auth/login"));
        assert!(paths.contains_key("/api/v1/admin/assign_course/{course_id}"));
        assert!(paths.contains_key("/api/v1/teacher/courses/{course_id}/gradebook"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
