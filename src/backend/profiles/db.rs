/**
 * Role Profile Database Operations
 *
 * Persistence for the student and teacher role profiles. Each profile
 * holds an exclusive one-to-one back-reference to an account (enforced by
 * a unique index on user_id); a student profile may additionally point at
 * one teacher profile (the enrollment relationship).
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Student role profile
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentProfile {
    pub id: Uuid,
    /// Owning account; at most one student profile per account
    pub user_id: Uuid,
    pub enrolled_date: NaiveDate,
    pub grade: String,
    pub parent_contact: String,
    /// Enrollment: the teacher profile this student is assigned to
    pub teacher_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Teacher role profile
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeacherProfile {
    pub id: Uuid,
    /// Owning account; at most one teacher profile per account
    pub user_id: Uuid,
    pub subject: String,
    pub experience: i32,
    pub qualifications: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Teacher profile joined with the owning account's display names,
/// for the public listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeacherListing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub experience: i32,
    pub qualifications: String,
}

/// Student profile joined with the owning account's display names,
/// for a teacher's roster listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentListing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub enrolled_date: NaiveDate,
    pub grade: String,
    pub parent_contact: String,
}

/// Get the student profile for an account
pub async fn get_student_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<StudentProfile>, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(
        r#"
        SELECT id, user_id, enrolled_date, grade, parent_contact, teacher_id, created_at, updated_at
        FROM student_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Create or update the student profile for an account
///
/// Upsert on the unique user_id index, so an account can never end up with
/// two student profiles. The enrollment reference is left untouched on
/// update.
pub async fn upsert_student_profile(
    pool: &PgPool,
    user_id: Uuid,
    enrolled_date: NaiveDate,
    grade: &str,
    parent_contact: &str,
) -> Result<StudentProfile, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, StudentProfile>(
        r#"
        INSERT INTO student_profiles (id, user_id, enrolled_date, grade, parent_contact, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (user_id) DO UPDATE
        SET enrolled_date = EXCLUDED.enrolled_date,
            grade = EXCLUDED.grade,
            parent_contact = EXCLUDED.parent_contact,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, enrolled_date, grade, parent_contact, teacher_id, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(enrolled_date)
    .bind(grade)
    .bind(parent_contact)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get the teacher profile for an account
pub async fn get_teacher_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<TeacherProfile>, sqlx::Error> {
    sqlx::query_as::<_, TeacherProfile>(
        r#"
        SELECT id, user_id, subject, experience, qualifications, created_at, updated_at
        FROM teacher_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Create or update the teacher profile for an account
pub async fn upsert_teacher_profile(
    pool: &PgPool,
    user_id: Uuid,
    subject: &str,
    experience: i32,
    qualifications: &str,
) -> Result<TeacherProfile, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, TeacherProfile>(
        r#"
        INSERT INTO teacher_profiles (id, user_id, subject, experience, qualifications, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (user_id) DO UPDATE
        SET subject = EXCLUDED.subject,
            experience = EXCLUDED.experience,
            qualifications = EXCLUDED.qualifications,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, subject, experience, qualifications, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(subject)
    .bind(experience)
    .bind(qualifications)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List all teacher profiles with their account display names
pub async fn list_teachers(pool: &PgPool) -> Result<Vec<TeacherListing>, sqlx::Error> {
    sqlx::query_as::<_, TeacherListing>(
        r#"
        SELECT t.id, t.user_id, u.first_name, u.last_name, t.subject, t.experience, t.qualifications
        FROM teacher_profiles t
        JOIN users u ON u.id = t.user_id
        ORDER BY u.last_name, u.first_name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Look up a teacher profile by its own id (enrollment target)
pub async fn get_teacher_profile_by_id(
    pool: &PgPool,
    teacher_id: Uuid,
) -> Result<Option<TeacherProfile>, sqlx::Error> {
    sqlx::query_as::<_, TeacherProfile>(
        r#"
        SELECT id, user_id, subject, experience, qualifications, created_at, updated_at
        FROM teacher_profiles
        WHERE id = $1
        "#,
    )
    .bind(teacher_id)
    .fetch_optional(pool)
    .await
}

/// List the students enrolled with a teacher, with their display names
pub async fn list_students_of_teacher(
    pool: &PgPool,
    teacher_id: Uuid,
) -> Result<Vec<StudentListing>, sqlx::Error> {
    sqlx::query_as::<_, StudentListing>(
        r#"
        SELECT s.id, s.user_id, u.first_name, u.last_name, s.enrolled_date, s.grade, s.parent_contact
        FROM student_profiles s
        JOIN users u ON u.id = s.user_id
        WHERE s.teacher_id = $1
        ORDER BY u.last_name, u.first_name
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

/// Assign a student profile to a teacher, by the student profile's own id
///
/// Returns `RowNotFound` if no such student profile exists. Re-assigning
/// an already enrolled student moves them to the new teacher.
pub async fn assign_student_to_teacher(
    pool: &PgPool,
    student_id: Uuid,
    teacher_id: Uuid,
) -> Result<StudentProfile, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(
        r#"
        UPDATE student_profiles
        SET teacher_id = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, user_id, enrolled_date, grade, parent_contact, teacher_id, created_at, updated_at
        "#,
    )
    .bind(teacher_id)
    .bind(Utc::now())
    .bind(student_id)
    .fetch_one(pool)
    .await
}

/// Drop a student profile from a teacher's roster
///
/// The teacher id is part of the predicate, so a teacher can only remove
/// students currently enrolled with them; anything else is `RowNotFound`.
pub async fn unassign_student_from_teacher(
    pool: &PgPool,
    student_id: Uuid,
    teacher_id: Uuid,
) -> Result<StudentProfile, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(
        r#"
        UPDATE student_profiles
        SET teacher_id = NULL, updated_at = $1
        WHERE id = $2 AND teacher_id = $3
        RETURNING id, user_id, enrolled_date, grade, parent_contact, teacher_id, created_at, updated_at
        "#,
    )
    .bind(Utc::now())
    .bind(student_id)
    .bind(teacher_id)
    .fetch_one(pool)
    .await
}

/// Assign a student to a teacher
///
/// Returns `RowNotFound` if the account has no student profile yet.
pub async fn enroll_student(
    pool: &PgPool,
    student_user_id: Uuid,
    teacher_id: Uuid,
) -> Result<StudentProfile, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(
        r#"
        UPDATE student_profiles
        SET teacher_id = $1, updated_at = $2
        WHERE user_id = $3
        RETURNING id, user_id, enrolled_date, grade, parent_contact, teacher_id, created_at, updated_at
        "#,
    )
    .bind(teacher_id)
    .bind(Utc::now())
    .bind(student_user_id)
    .fetch_one(pool)
    .await
}
