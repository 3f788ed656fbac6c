use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::VehicleRepository;
use crate::models::{NewVehicle, Vehicle, VehicleChanges, VehicleFilters, VehicleStatus};
use crate::utils::errors::{map_db_error, AppError, AppResult};

const VEHICLE_COLUMNS: &str = "id, name, category, plate_number, price, status, created_at";

// Fila tal como sale de la tabla vehicles
#[derive(Debug, FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    category: String,
    plate_number: String,
    price: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: row.id,
            name: row.name,
            category: row.category,
            plate_number: row.plate_number,
            price: row.price,
            status: row.status.parse::<VehicleStatus>().map_err(AppError::Internal)?,
            created_at: row.created_at,
        })
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding vehicle"))?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {} FROM vehicles
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(filters.category.as_deref())
        .bind(filters.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listing vehicles"))?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (id, name, category, plate_number, price, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&vehicle.name)
        .bind(&vehicle.category)
        .bind(&vehicle.plate_number)
        .bind(vehicle.price)
        .bind(vehicle.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creating vehicle"))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                plate_number = COALESCE($4, plate_number),
                price = COALESCE($5, price),
                status = COALESCE($6, status)
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.category)
        .bind(changes.plate_number)
        .bind(changes.price)
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error updating vehicle"))?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error deleting vehicle"))?;

        Ok(result.rows_affected() > 0)
    }
}
