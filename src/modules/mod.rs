pub mod attendance;
pub mod auth;
pub mod branches;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod grades;
pub mod sessions;
pub mod students;
pub mod users;
