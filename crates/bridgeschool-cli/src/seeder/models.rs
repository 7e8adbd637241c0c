//! Seeding configuration and the rows generated from it.

use bridgeschool_auth::Role;
use bridgeschool_models::{BranchId, ClassId, CourseId, SessionId};
use chrono::NaiveDate;

/// Seeded branches carry this prefix so they can be cleared later.
pub const SEED_BRANCH_PREFIX: &str = "Seed ";
/// Domain of every seeded staff email.
pub const SEED_EMAIL_DOMAIN: &str = "seed.bridge.school";
/// Password shared by every seeded staff account.
pub const SEED_PASSWORD: &str = "password123";

pub struct BranchSeed {
    pub name: String,
    pub address: String,
}

pub struct StaffSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub branch_id: BranchId,
}

pub struct ClassSeed {
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
}

pub struct CourseSeed {
    pub name: String,
    pub branch_id: BranchId,
    pub session_id: SessionId,
}

pub struct StudentSeed {
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub branch_id: BranchId,
    pub class_id: ClassId,
}

/// A seeded class-course pair.
pub struct LinkSeed {
    pub class_id: ClassId,
    pub course_id: CourseId,
}

#[derive(Clone, Debug)]
pub struct StaffPerBranch {
    pub admins: usize,
    pub teachers: usize,
}

impl Default for StaffPerBranch {
    fn default() -> Self {
        Self {
            admins: 1,
            teachers: 4,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AcademicsPerBranch {
    pub classes: usize,
    pub courses: usize,
    pub students_per_class: usize,
}

impl Default for AcademicsPerBranch {
    fn default() -> Self {
        Self {
            classes: 4,
            courses: 6,
            students_per_class: 20,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SeedConfig {
    pub branches: usize,
    pub staff: StaffPerBranch,
    pub academics: AcademicsPerBranch,
}

impl SeedConfig {
    pub fn new(branches: usize) -> Self {
        Self {
            branches,
            ..Default::default()
        }
    }

    pub fn with_staff(mut self, staff: StaffPerBranch) -> Self {
        self.staff = staff;
        self
    }

    pub fn with_academics(mut self, academics: AcademicsPerBranch) -> Self {
        self.academics = academics;
        self
    }

    pub fn total_students(&self) -> usize {
        self.branches * self.academics.classes * self.academics.students_per_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_students() {
        let config = SeedConfig::new(3).with_academics(AcademicsPerBranch {
            classes: 2,
            courses: 1,
            students_per_class: 10,
        });
        assert_eq!(config.total_students(), 60);
    }
}
