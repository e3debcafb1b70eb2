//! Role Profiles Module
//!
//! Student and teacher role profiles plus the enrollment relationship.
//! These are peripheral data records: each holds a one-to-one back-reference
//! to an account, and a student profile may point at one teacher profile.

/// Profile models and database operations
pub mod db;

/// HTTP handlers for profile endpoints
pub mod handlers;

pub use db::{StudentListing, StudentProfile, TeacherListing, TeacherProfile};
pub use handlers::{
    add_student, enroll, enroll_with_teacher, get_all_teachers, get_my_student_profile,
    get_my_students, get_my_teacher_profile, put_my_student_profile, put_my_teacher_profile,
    remove_student,
};
