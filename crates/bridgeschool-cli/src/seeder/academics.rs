//! Classes, courses, students and the links between them.

use bridgeschool_models::{BranchId, ClassId, CourseId, SessionId, StudentId, UserId};
use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;

use super::models::{AcademicsPerBranch, ClassSeed, CourseSeed, LinkSeed, StudentSeed};
use super::values_clause;

const BATCH_SIZE: usize = 1000;

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "English",
    "Basic Science",
    "Social Studies",
    "Computer Studies",
    "French",
    "Agricultural Science",
    "Civic Education",
    "Fine Art",
    "Music",
];

pub fn generate_classes(
    branches: &[(BranchId, SessionId)],
    per_branch: &AcademicsPerBranch,
) -> Vec<ClassSeed> {
    branches
        .iter()
        .flat_map(|&(branch_id, session_id)| {
            (0..per_branch.classes).map(move |i| ClassSeed {
                name: format!("Grade {}", i + 1),
                branch_id,
                session_id,
            })
        })
        .collect()
}

pub fn generate_courses(
    branches: &[(BranchId, SessionId)],
    per_branch: &AcademicsPerBranch,
) -> Vec<CourseSeed> {
    branches
        .iter()
        .flat_map(|&(branch_id, session_id)| {
            (0..per_branch.courses).map(move |i| CourseSeed {
                name: match SUBJECTS.get(i) {
                    Some(subject) => subject.to_string(),
                    None => format!("Elective {}", i + 1 - SUBJECTS.len()),
                },
                branch_id,
                session_id,
            })
        })
        .collect()
}

pub fn generate_students(
    classes: &[(ClassId, BranchId)],
    students_per_class: usize,
) -> anyhow::Result<Vec<StudentSeed>> {
    let earliest = NaiveDate::from_ymd_opt(2008, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid base date"))?;

    Ok(classes
        .par_iter()
        .flat_map(|&(class_id, branch_id)| {
            (0..students_per_class)
                .map(|_| {
                    let first_name: String = FirstName().fake();
                    let last_name: String = LastName().fake();
                    let offset: u64 = (0..3650).fake();
                    let gender = if (0..2).fake::<u8>() == 0 {
                        "female"
                    } else {
                        "male"
                    };
                    StudentSeed {
                        name: format!("{} {}", first_name, last_name),
                        dob: earliest
                            .checked_add_days(Days::new(offset))
                            .unwrap_or(earliest),
                        gender: gender.to_string(),
                        branch_id,
                        class_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect())
}

/// Every class takes every course of its branch.
pub fn generate_links(
    classes: &[(ClassId, BranchId)],
    courses: &[(CourseId, BranchId)],
) -> Vec<LinkSeed> {
    classes
        .iter()
        .flat_map(|&(class_id, class_branch)| {
            courses
                .iter()
                .filter(move |(_, course_branch)| *course_branch == class_branch)
                .map(move |&(course_id, _)| LinkSeed {
                    class_id,
                    course_id,
                })
        })
        .collect()
}

async fn insert_classes(
    tx: &mut Transaction<'_, Postgres>,
    classes: &[ClassSeed],
) -> anyhow::Result<Vec<(ClassId, BranchId)>> {
    let mut ids = Vec::with_capacity(classes.len());
    for chunk in classes.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO classes (name, branch_id, session_id) VALUES {} RETURNING id",
            values_clause(chunk.len(), 3)
        );
        let mut q = sqlx::query_scalar::<_, ClassId>(&query);
        for seed in chunk {
            q = q.bind(&seed.name).bind(seed.branch_id).bind(seed.session_id);
        }
        let chunk_ids = q.fetch_all(&mut **tx).await?;
        ids.extend(chunk_ids.into_iter().zip(chunk.iter().map(|c| c.branch_id)));
    }
    Ok(ids)
}

async fn insert_courses(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> anyhow::Result<Vec<(CourseId, BranchId)>> {
    let mut ids = Vec::with_capacity(courses.len());
    for chunk in courses.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO courses (name, branch_id, session_id) VALUES {} RETURNING id",
            values_clause(chunk.len(), 3)
        );
        let mut q = sqlx::query_scalar::<_, CourseId>(&query);
        for seed in chunk {
            q = q.bind(&seed.name).bind(seed.branch_id).bind(seed.session_id);
        }
        let chunk_ids = q.fetch_all(&mut **tx).await?;
        ids.extend(chunk_ids.into_iter().zip(chunk.iter().map(|c| c.branch_id)));
    }
    Ok(ids)
}

async fn insert_students(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> anyhow::Result<()> {
    for chunk in students.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO students (name, dob, gender, branch_id) VALUES {} RETURNING id",
            values_clause(chunk.len(), 4)
        );
        let mut q = sqlx::query_scalar::<_, StudentId>(&query);
        for seed in chunk {
            q = q
                .bind(&seed.name)
                .bind(seed.dob)
                .bind(&seed.gender)
                .bind(seed.branch_id);
        }
        let ids = q.fetch_all(&mut **tx).await?;

        let query = format!(
            "INSERT INTO student_classes (student_id, class_id) VALUES {}",
            values_clause(ids.len(), 2)
        );
        let mut q = sqlx::query(&query);
        for (id, seed) in ids.iter().zip(chunk) {
            q = q.bind(id).bind(seed.class_id);
        }
        q.execute(&mut **tx).await?;
    }
    Ok(())
}

/// Links each class-course pair and hands it to a teacher of the branch,
/// round robin. Each class also gets a homeroom teacher.
async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    links: &[LinkSeed],
    classes: &[(ClassId, BranchId)],
    teachers: &[(BranchId, UserId)],
) -> anyhow::Result<()> {
    let mut by_branch: HashMap<BranchId, Vec<UserId>> = HashMap::new();
    for &(branch_id, teacher_id) in teachers {
        by_branch.entry(branch_id).or_default().push(teacher_id);
    }
    let class_branch: HashMap<ClassId, BranchId> = classes.iter().copied().collect();

    for chunk in links.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO class_courses (class_id, course_id) VALUES {}",
            values_clause(chunk.len(), 2)
        );
        let mut q = sqlx::query(&query);
        for link in chunk {
            q = q.bind(link.class_id).bind(link.course_id);
        }
        q.execute(&mut **tx).await?;
    }

    let assigned: Vec<(UserId, &LinkSeed)> = links
        .iter()
        .enumerate()
        .filter_map(|(i, link)| {
            let branch = class_branch.get(&link.class_id)?;
            let pool = by_branch.get(branch)?;
            Some((pool[i % pool.len()], link))
        })
        .collect();

    for chunk in assigned.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO teacher_courses (teacher_id, course_id, class_id) VALUES {}",
            values_clause(chunk.len(), 3)
        );
        let mut q = sqlx::query(&query);
        for (teacher_id, link) in chunk {
            q = q.bind(teacher_id).bind(link.course_id).bind(link.class_id);
        }
        q.execute(&mut **tx).await?;
    }

    for (i, (class_id, branch_id)) in classes.iter().enumerate() {
        if let Some(pool) = by_branch.get(branch_id) {
            sqlx::query("UPDATE classes SET class_teacher_id = $1 WHERE id = $2")
                .bind(pool[i % pool.len()])
                .bind(class_id)
                .execute(&mut **tx)
                .await?;
        }
    }

    Ok(())
}

pub async fn seed_academics(
    db: &PgPool,
    branches: &[(BranchId, SessionId)],
    teachers: &[(BranchId, UserId)],
    per_branch: &AcademicsPerBranch,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!(
        "📖 Seeding {} classes and {} courses per branch...",
        per_branch.classes, per_branch.courses
    );

    let mut tx = db.begin().await?;

    let classes = insert_classes(&mut tx, &generate_classes(branches, per_branch)).await?;
    let courses = insert_courses(&mut tx, &generate_courses(branches, per_branch)).await?;

    let students = generate_students(&classes, per_branch.students_per_class)?;
    println!("🎓 Seeding {} students...", students.len());
    insert_students(&mut tx, &students).await?;

    let links = generate_links(&classes, &courses);
    insert_links(&mut tx, &links, &classes, teachers).await?;

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} classes, {} courses, {} students in {:?}",
        classes.len(),
        courses.len(),
        students.len(),
        start_time.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_stay_within_branch() {
        let classes = [(ClassId(1), BranchId(1)), (ClassId(2), BranchId(2))];
        let courses = [
            (CourseId(10), BranchId(1)),
            (CourseId(11), BranchId(1)),
            (CourseId(20), BranchId(2)),
        ];

        let links = generate_links(&classes, &courses);
        assert_eq!(links.len(), 3);
        assert!(
            links
                .iter()
                .filter(|l| l.class_id == ClassId(2))
                .all(|l| l.course_id == CourseId(20))
        );
    }

    #[test]
    fn test_course_names_fall_back_to_electives() {
        let per_branch = AcademicsPerBranch {
            classes: 1,
            courses: SUBJECTS.len() + 2,
            students_per_class: 0,
        };
        let courses = generate_courses(&[(BranchId(1), SessionId(1))], &per_branch);
        assert_eq!(courses[0].name, "Mathematics");
        assert_eq!(courses.last().unwrap().name, "Elective 2");
    }

    #[test]
    fn test_generated_students_have_class_and_plausible_dob() {
        let students = generate_students(&[(ClassId(3), BranchId(1))], 5).unwrap();
        assert_eq!(students.len(), 5);
        let floor = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();
        assert!(students.iter().all(|s| s.class_id == ClassId(3) && s.dob >= floor));
    }
}
