use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListQuery};
use crate::dto::ApiResponse;
use crate::models::{NewVehicle, Vehicle, VehicleChanges, VehicleFilters, VehicleStatus};
use crate::repositories::Repositories;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    repos: Repositories,
}

impl VehicleController {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;

        // Validar campos
        if request.plate_number.trim().is_empty() {
            return Err(AppError::Validation("plateNumber is required".to_string()));
        }
        let price = non_negative_price(request.price)?.unwrap_or(Decimal::ZERO);
        let status = parse_status(request.status.as_deref())?.unwrap_or(VehicleStatus::Available);

        let vehicle = self
            .repos
            .vehicles
            .create(NewVehicle {
                name: request.name.trim().to_string(),
                category: request.category.trim().to_string(),
                plate_number: request.plate_number.trim().to_string(),
                price,
                status,
            })
            .await?;

        tracing::info!("🚗 Vehículo creado: {} ({})", vehicle.name, vehicle.plate_number);
        Ok(ApiResponse::success_with_message(vehicle, "Vehicle created successfully"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repos
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    pub async fn list(&self, query: VehicleListQuery) -> AppResult<Vec<Vehicle>> {
        let filters = VehicleFilters {
            category: query.category.filter(|c| !c.trim().is_empty()),
            status: parse_status(query.status.as_deref())?,
        };
        self.repos.vehicles.list(&filters).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;

        let changes = VehicleChanges {
            name: request.name,
            category: request.category,
            plate_number: request.plate_number.map(|p| p.trim().to_string()),
            price: non_negative_price(request.price)?,
            status: parse_status(request.status.as_deref())?,
        };

        let vehicle = self.repos.vehicles.update(id, changes).await?;
        Ok(ApiResponse::success_with_message(vehicle, "Vehicle updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repos.vehicles.delete(id).await? {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }
        tracing::info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}

fn parse_status(value: Option<&str>) -> AppResult<Option<VehicleStatus>> {
    value.map(str::parse).transpose().map_err(AppError::Validation)
}

fn non_negative_price(price: Option<Decimal>) -> AppResult<Option<Decimal>> {
    match price {
        Some(p) if p.is_sign_negative() => Err(AppError::Validation("price must not be negative".to_string())),
        other => Ok(other),
    }
}
