/**
 * Role Profile Handlers
 *
 * HTTP handlers for the student/teacher role profiles and the enrollment
 * relationship:
 *
 * - GET/PUT /api/students/profile - own student profile (authenticated)
 * - GET/PUT /api/teachers/profile - own teacher profile (authenticated)
 * - GET /api/teachers - public teacher listing
 * - POST /api/students/enroll - assign the current student to a teacher
 * - POST /api/students/enroll/{teacher_id} - same, teacher in the path
 * - GET /api/teachers/students - the current teacher's roster
 * - POST /api/teachers/students/add - teacher pulls a student onto the roster
 * - POST /api/teachers/students/remove - teacher drops a student
 *
 * Enrollment can be driven from either side: a student picks a teacher, or
 * a teacher manages their own roster. Both write the same
 * `student_profiles.teacher_id` reference.
 *
 * Upserting a role profile also flips the matching role flag on the
 * account record.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::set_role_flag;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::profiles::db::{
    assign_student_to_teacher, enroll_student, get_student_profile, get_teacher_profile,
    get_teacher_profile_by_id, list_students_of_teacher, list_teachers,
    unassign_student_from_teacher, upsert_student_profile, upsert_teacher_profile,
    StudentListing, StudentProfile, TeacherListing, TeacherProfile,
};

/// Student profile create/update request
#[derive(Deserialize, Serialize, Debug)]
pub struct StudentProfileRequest {
    pub enrolled_date: NaiveDate,
    pub grade: String,
    #[serde(default)]
    pub parent_contact: String,
}

/// Teacher profile create/update request
#[derive(Deserialize, Serialize, Debug)]
pub struct TeacherProfileRequest {
    pub subject: String,
    pub experience: i32,
    #[serde(default)]
    pub qualifications: String,
}

/// Enrollment request
#[derive(Deserialize, Serialize, Debug)]
pub struct EnrollRequest {
    /// Teacher profile id (not the teacher's account id)
    pub teacher_id: Uuid,
}

/// Roster add/remove request
#[derive(Deserialize, Serialize, Debug)]
pub struct RosterRequest {
    /// Student profile id (not the student's account id)
    pub student_id: Uuid,
}

/// Get own student profile
pub async fn get_my_student_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let profile = get_student_profile(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Student profile"))?;
    Ok(Json(profile))
}

/// Create or update own student profile
pub async fn put_my_student_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<StudentProfileRequest>,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    if request.grade.trim().is_empty() {
        return Err(ApiError::invalid_input("grade", "Grade is required"));
    }

    let profile = upsert_student_profile(
        &pool,
        auth.user_id,
        request.enrolled_date,
        &request.grade,
        &request.parent_contact,
    )
    .await?;
    set_role_flag(&pool, auth.user_id, true, false).await?;

    tracing::info!("Student profile saved for user: {}", auth.user_id);
    Ok(Json(profile))
}

/// Get own teacher profile
pub async fn get_my_teacher_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<TeacherProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let profile = get_teacher_profile(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;
    Ok(Json(profile))
}

/// Create or update own teacher profile
pub async fn put_my_teacher_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<TeacherProfileRequest>,
) -> Result<Json<TeacherProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    if request.subject.trim().is_empty() {
        return Err(ApiError::invalid_input("subject", "Subject is required"));
    }
    if request.experience < 0 {
        return Err(ApiError::invalid_input(
            "experience",
            "Experience must not be negative",
        ));
    }

    let profile = upsert_teacher_profile(
        &pool,
        auth.user_id,
        &request.subject,
        request.experience,
        &request.qualifications,
    )
    .await?;
    set_role_flag(&pool, auth.user_id, false, true).await?;

    tracing::info!("Teacher profile saved for user: {}", auth.user_id);
    Ok(Json(profile))
}

/// Public teacher listing
pub async fn get_all_teachers(
    State(pool): State<Option<PgPool>>,
) -> Result<Json<Vec<TeacherListing>>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    let teachers = list_teachers(&pool).await?;
    Ok(Json(teachers))
}

/// Enroll the current student with a teacher
///
/// The target is verified first so a dangling teacher id reports 404
/// instead of a foreign-key failure.
pub async fn enroll(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<EnrollRequest>,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    get_teacher_profile_by_id(&pool, request.teacher_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;

    let profile = enroll_student(&pool, auth.user_id, request.teacher_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Student profile"),
            other => ApiError::Database(other),
        })?;

    tracing::info!(
        "Student {} enrolled with teacher profile {}",
        auth.user_id,
        request.teacher_id
    );
    Ok(Json(profile))
}

/// Enroll the current student with a teacher named in the path
///
/// Same operation as `enroll`, for clients that carry the teacher id in
/// the URL instead of a body.
pub async fn enroll_with_teacher(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    get_teacher_profile_by_id(&pool, teacher_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;

    let profile = enroll_student(&pool, auth.user_id, teacher_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Student profile"),
            other => ApiError::Database(other),
        })?;

    tracing::info!(
        "Student {} enrolled with teacher profile {}",
        auth.user_id,
        teacher_id
    );
    Ok(Json(profile))
}

/// List the current teacher's enrolled students
pub async fn get_my_students(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<StudentListing>>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let teacher = get_teacher_profile(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;

    let students = list_students_of_teacher(&pool, teacher.id).await?;
    Ok(Json(students))
}

/// Add a student to the current teacher's roster
///
/// The teacher side of enrollment: writes the same reference the student's
/// own enroll call does. An already enrolled student is moved.
pub async fn add_student(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<RosterRequest>,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let teacher = get_teacher_profile(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;

    let profile = assign_student_to_teacher(&pool, request.student_id, teacher.id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Student profile"),
            other => ApiError::Database(other),
        })?;

    tracing::info!(
        "Teacher profile {} added student profile {}",
        teacher.id,
        request.student_id
    );
    Ok(Json(profile))
}

/// Remove a student from the current teacher's roster
///
/// Only students currently enrolled with the calling teacher can be
/// removed; anyone else's student reports 404.
pub async fn remove_student(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<RosterRequest>,
) -> Result<Json<StudentProfile>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let teacher = get_teacher_profile(&pool, auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Teacher profile"))?;

    let profile = unassign_student_from_teacher(&pool, request.student_id, teacher.id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Student profile"),
            other => ApiError::Database(other),
        })?;

    tracing::info!(
        "Teacher profile {} removed student profile {}",
        teacher.id,
        request.student_id
    );
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_profile_request_defaults() {
        let request: StudentProfileRequest = serde_json::from_str(
            r#"{"enrolled_date": "2026-01-15", "grade": "7"}"#,
        )
        .unwrap();
        assert_eq!(request.grade, "7");
        assert_eq!(request.parent_contact, "");
    }

    #[test]
    fn test_roster_request_parses() {
        let id = Uuid::new_v4();
        let request: RosterRequest =
            serde_json::from_str(&format!(r#"{{"student_id": "{}"}}"#, id)).unwrap();
        assert_eq!(request.student_id, id);
    }

    #[test]
    fn test_teacher_profile_request_parses() {
        let request: TeacherProfileRequest = serde_json::from_str(
            r#"{"subject": "Mathematics", "experience": 5, "qualifications": "MSc"}"#,
        )
        .unwrap();
        assert_eq!(request.subject, "Mathematics");
        assert_eq!(request.experience, 5);
    }
}
