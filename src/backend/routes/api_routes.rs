/**
 * API Route Handlers
 *
 * This module wires the account, authentication, and profile handlers to
 * their routes.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - user registration
 * - `POST /api/auth/login` - user login
 * - `POST /api/auth/refresh` - exchange a refresh token for a new pair
 * - `POST /api/auth/password/reset` - request a reset email
 * - `POST /api/auth/password/reset/confirm/{uid}/{token}` - apply a reset
 * - `GET /api/teachers` - teacher listing
 *
 * ## Authenticated (bearer access token required)
 * - `POST /api/auth/logout` - acknowledge logout
 * - `GET /api/auth/validate` - token validity probe
 * - `GET/PUT /api/auth/profile` - own account profile
 * - `POST /api/auth/password/change` - in-session password change
 * - `GET/PUT /api/students/profile` - own student profile
 * - `GET/PUT /api/teachers/profile` - own teacher profile
 * - `POST /api/students/enroll` - enroll with a teacher
 * - `POST /api/students/enroll/{teacher_id}` - enroll, teacher in the path
 * - `GET /api/teachers/students` - own roster
 * - `POST /api/teachers/students/add` - add a student to the roster
 * - `POST /api/teachers/students/remove` - drop a student from the roster
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{
    change_password, confirm_reset, get_me, login, logout, refresh, request_reset, signup,
    update_me, validate_token,
};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::profiles::{
    add_student, enroll, enroll_with_teacher, get_all_teachers, get_my_student_profile,
    get_my_students, get_my_teacher_profile, put_my_student_profile, put_my_teacher_profile,
    remove_student,
};
use crate::backend::server::state::AppState;

/// Configure the public API routes
///
/// These endpoints need no bearer token: registration, login, refresh,
/// both reset steps, and the teacher listing.
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/register", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/password/reset", post(request_reset))
        .route(
            "/api/auth/password/reset/confirm/{uid}/{token}",
            post(confirm_reset),
        )
        .route("/api/teachers", get(get_all_teachers))
}

/// Build the authenticated route group
///
/// Every route here sits behind `auth_middleware`, so handlers can rely on
/// the `AuthUser` extractor finding a verified user in the request.
pub fn authenticated_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/validate", get(validate_token))
        .route("/api/auth/profile", get(get_me).put(update_me))
        .route("/api/auth/password/change", post(change_password))
        .route(
            "/api/students/profile",
            get(get_my_student_profile).put(put_my_student_profile),
        )
        .route(
            "/api/teachers/profile",
            get(get_my_teacher_profile).put(put_my_teacher_profile),
        )
        .route("/api/students/enroll", post(enroll))
        .route("/api/students/enroll/{teacher_id}", post(enroll_with_teacher))
        .route("/api/teachers/students", get(get_my_students))
        .route("/api/teachers/students/add", post(add_student))
        .route("/api/teachers/students/remove", post(remove_student))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ))
}
