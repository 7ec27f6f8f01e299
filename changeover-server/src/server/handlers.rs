//! Endpoint handlers, one per route

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use super::AppState;
use super::error::ApiError;
use super::models::{
    AddPartRequest, DeletePartParams, MessageResponse, UpdateTimeRequest, UpdatedResponse,
};
use crate::matrix::{CellValue, MatrixView};

/// File name offered to the client, independent of where the export is written
pub const DOWNLOAD_FILE_NAME: &str = "matrix_data.xlsx";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Multipart field carrying the spreadsheet
const UPLOAD_FIELD: &str = "file";

pub async fn get_matrix_data(State(state): State<AppState>) -> Result<Json<MatrixView>, ApiError> {
    Ok(Json(state.store.matrix().await?))
}

pub async fn download_excel(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.store.export(&state.export_path).await?;

    let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn upload_excel(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut content = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            content = Some(field.bytes().await?.to_vec());
            break;
        }
    }
    let content = content.ok_or(ApiError::MissingField(UPLOAD_FIELD))?;

    state.store.import(content).await?;

    Ok(Json(MessageResponse {
        message: "Data updated successfully".to_string(),
    }))
}

pub async fn add_part(
    State(state): State<AppState>,
    request: Result<Json<AddPartRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let Json(request) = request?;
    let updated_data = state.store.add_part(&request.part_no).await?;

    Ok(Json(UpdatedResponse {
        message: format!("Part {} added successfully", request.part_no),
        updated_data,
    }))
}

pub async fn delete_part(
    State(state): State<AppState>,
    params: Result<Query<DeletePartParams>, QueryRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let Query(params) = params?;
    let updated_data = state.store.delete_part(&params.part_no).await?;

    Ok(Json(UpdatedResponse {
        message: format!("Part {} deleted successfully", params.part_no),
        updated_data,
    }))
}

pub async fn update_time(
    State(state): State<AppState>,
    request: Result<Json<UpdateTimeRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let Json(request) = request?;
    let updated_data = state
        .store
        .update_cell(
            &request.part_no,
            &request.target_part_no,
            CellValue::Number(request.changeover_time),
        )
        .await?;

    Ok(Json(UpdatedResponse {
        message: format!(
            "Time updated successfully for {} -> {}",
            request.part_no, request.target_part_no
        ),
        updated_data,
    }))
}
