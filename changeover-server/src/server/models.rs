//! Request and response bodies

use serde::{Deserialize, Serialize};

use crate::matrix::ChangeoverTable;

#[derive(Debug, Deserialize)]
pub struct AddPartRequest {
    pub part_no: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletePartParams {
    pub part_no: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTimeRequest {
    pub part_no: String,
    pub target_part_no: String,
    pub changeover_time: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Mutation result carrying the raw table
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub updated_data: ChangeoverTable,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
