//! Request handlers. Each one authenticates, unpacks its input and hands
//! off to `GradebookService`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use gb_core::enums::Semester;
use gb_core::requests::{CreateAssignment, EnrollmentGradeUpdate, GradeScoreUpdate, UpdateAssignment};
use gb_core::responses::{
    AssignmentDto, AssignmentStudentDto, BatchReport, EnrollmentDto, GradeDto, SectionDto,
};
use serde::Deserialize;

use super::AppState;
use super::caller::Caller;
use super::error::ApiError;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `?year=2025&semester=Fall`. The semester is matched case-insensitively.
#[derive(Debug, Deserialize)]
pub struct TermQuery {
    pub year: i32,
    pub semester: String,
}

impl TermQuery {
    fn semester(&self) -> Result<Semester, ApiError> {
        Ok(self.semester.parse()?)
    }
}

fn query<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Query(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn path<T>(extracted: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Path(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn body<T>(extracted: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_sections(
    State(state): State<AppState>,
    Caller(caller): Caller,
    term: Result<Query<TermQuery>, QueryRejection>,
) -> ApiResult<Vec<SectionDto>> {
    let term = query(term)?;
    let sections = state
        .service
        .list_sections(&caller, term.year, term.semester()?)
        .await?;
    Ok(Json(sections))
}

pub async fn list_section_assignments(
    State(state): State<AppState>,
    Caller(caller): Caller,
    sec_no: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<AssignmentDto>> {
    let sec_no = path(sec_no)?;
    Ok(Json(state.service.list_section_assignments(&caller, sec_no).await?))
}

pub async fn list_section_enrollments(
    State(state): State<AppState>,
    Caller(caller): Caller,
    sec_no: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<EnrollmentDto>> {
    let sec_no = path(sec_no)?;
    Ok(Json(state.service.list_enrollments(&caller, sec_no).await?))
}

pub async fn list_student_assignments(
    State(state): State<AppState>,
    Caller(caller): Caller,
    term: Result<Query<TermQuery>, QueryRejection>,
) -> ApiResult<Vec<AssignmentStudentDto>> {
    let term = query(term)?;
    let assignments = state
        .service
        .list_student_assignments(&caller, term.year, term.semester()?)
        .await?;
    Ok(Json(assignments))
}

pub async fn get_assignment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<AssignmentDto> {
    let id = path(id)?;
    Ok(Json(state.service.assignment(&caller, id).await?))
}

pub async fn create_assignment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    req: Result<Json<CreateAssignment>, JsonRejection>,
) -> ApiResult<AssignmentDto> {
    let req = body(req)?;
    Ok(Json(state.service.create_assignment(&caller, &req).await?))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    req: Result<Json<UpdateAssignment>, JsonRejection>,
) -> ApiResult<AssignmentDto> {
    let req = body(req)?;
    Ok(Json(state.service.update_assignment(&caller, &req).await?))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Caller(caller): Caller,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(), ApiError> {
    let id = path(id)?;
    state.service.delete_assignment(&caller, id).await?;
    Ok(())
}

pub async fn list_grades(
    State(state): State<AppState>,
    Caller(caller): Caller,
    assignment_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<GradeDto>> {
    let assignment_id = path(assignment_id)?;
    Ok(Json(state.service.list_grades(&caller, assignment_id).await?))
}

pub async fn update_grades(
    State(state): State<AppState>,
    Caller(caller): Caller,
    updates: Result<Json<Vec<GradeScoreUpdate>>, JsonRejection>,
) -> ApiResult<BatchReport> {
    let updates = body(updates)?;
    Ok(Json(state.service.update_grades(&caller, &updates).await?))
}

pub async fn update_enrollment_grades(
    State(state): State<AppState>,
    Caller(caller): Caller,
    updates: Result<Json<Vec<EnrollmentGradeUpdate>>, JsonRejection>,
) -> ApiResult<BatchReport> {
    let updates = body(updates)?;
    Ok(Json(state.service.update_enrollment_grades(&caller, &updates).await?))
}
