//! Controlador de rentals
//!
//! Transiciones de estado y de pago, listado, detalle y borrado. Las dos
//! transiciones sobrescriben el campo sin comprobar el estado anterior.

use uuid::Uuid;

use crate::dto::rental_dto::{BulkDeleteRequest, RentalListQuery, UpdatePaymentStatusRequest, UpdateRentalStatusRequest};
use crate::models::{PaymentStatus, RentalDetail, RentalFilters, RentalStatus};
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::required;

pub struct RentalController {
    repos: Repositories,
}

impl RentalController {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn update_status(&self, id: Uuid, request: UpdateRentalStatusRequest) -> AppResult<RentalDetail> {
        let status: RentalStatus = required(&request.status, "status")?
            .parse()
            .map_err(AppError::Validation)?;

        self.repos.rentals.update_status(id, status).await?;
        tracing::info!("🔄 Rental {} -> {}", id, status);
        self.detail(id).await
    }

    pub async fn update_payment_status(&self, id: Uuid, request: UpdatePaymentStatusRequest) -> AppResult<RentalDetail> {
        let payment_status: PaymentStatus = required(&request.payment_status, "paymentStatus")?
            .parse()
            .map_err(AppError::Validation)?;

        self.repos.rentals.update_payment_status(id, payment_status).await?;
        tracing::info!("💳 Pago del rental {} -> {}", id, payment_status);
        self.detail(id).await
    }

    pub async fn bulk_delete(&self, request: BulkDeleteRequest) -> AppResult<u64> {
        let ids = match request.rental_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => {
                return Err(AppError::Validation(
                    "rentalIds must be a non-empty array".to_string(),
                ))
            }
        };

        let deleted = self.repos.rentals.delete_many(&ids).await?;
        tracing::info!("🗑️ {} de {} rentals eliminados", deleted, ids.len());
        Ok(deleted)
    }

    pub async fn list(&self, query: RentalListQuery) -> AppResult<Vec<RentalDetail>> {
        let filters = RentalFilters {
            status: query
                .status
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(AppError::Validation)?,
            payment_status: query
                .payment_status
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(AppError::Validation)?,
            vehicle_id: query.vehicle_id,
            customer_id: query.customer_id,
        };

        self.repos.rentals.list(&filters).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<RentalDetail> {
        self.detail(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repos.rentals.delete(id).await? {
            return Err(not_found_error("Rental", &id.to_string()));
        }
        tracing::info!("🗑️ Rental {} eliminado", id);
        Ok(())
    }

    async fn detail(&self, id: Uuid) -> AppResult<RentalDetail> {
        self.repos
            .rentals
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Rental", &id.to_string()))
    }
}
