use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::RentalDetail;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRentalStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub rental_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalListQuery {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub success: bool,
    pub rental: RentalDetail,
}

#[derive(Debug, Serialize)]
pub struct RentalListResponse {
    pub success: bool,
    pub rentals: Vec<RentalDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}
