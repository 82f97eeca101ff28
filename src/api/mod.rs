use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tracing::debug;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

const REQUIRED_FIELDS: &str = "Course title, duration and description are required";
const CONTENT_TYPE_NOT_ALLOWED: &str = "Content Type not allowed";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/courses", get(list_courses))
        .route("/api/v1/course", post(add_course).put(update_course))
        .route("/api/v1/course/{courseid}", get(get_course).delete(delete_course))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.courses.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses.get_all().await?;
    Ok(Json(courses))
}

async fn get_course(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    let response = match state.courses.get_by_title(&title).await? {
        Some(course) => Json(course).into_response(),
        None => Json(Message::new("Course not found")).into_response(),
    };
    Ok(response)
}

async fn add_course(
    State(state): State<AppState>,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = course_body(payload)?;
    debug!("adding course '{}'", req.title);
    state.courses.add(&req.title, req.duration, &req.description).await?;
    Ok(Json(Message::new("Course added successfully")))
}

async fn update_course(
    State(state): State<AppState>,
    payload: Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<Message>, AppError> {
    let req = course_body(payload)?;
    debug!("updating course '{}'", req.title);
    state.courses.update(&req.title, req.duration, &req.description).await?;
    Ok(Json(Message::new("Course updated successfully")))
}

async fn delete_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(title): Path<String>,
) -> Result<Json<Message>, AppError> {
    if !is_json(&headers) {
        return Err(AppError::BadRequest(CONTENT_TYPE_NOT_ALLOWED.to_string()));
    }
    state.courses.delete_by_title(&title).await?;
    Ok(Json(Message::new("Course deleted successfully")))
}

fn course_body(payload: Result<Json<CourseRequest>, JsonRejection>) -> Result<CourseRequest, AppError> {
    let Json(req) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest(CONTENT_TYPE_NOT_ALLOWED.to_string())
        }
        other => AppError::BadRequest(other.body_text()),
    })?;

    if !req.is_complete() {
        return Err(AppError::BadRequest(REQUIRED_FIELDS.to_string()));
    }
    Ok(req)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
