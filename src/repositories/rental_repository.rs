use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::RentalRepository;
use crate::models::{
    CustomerSummary, NewRental, PaymentStatus, Rental, RentalDetail, RentalFilters, RentalStatus,
    VehicleSummary,
};
use crate::utils::errors::{map_db_error, AppError, AppResult};

const RENTAL_COLUMNS: &str = "r.id, r.rental_code, r.customer_id, r.vehicle_id, r.start_date, \
    r.end_date, r.status, r.payment_status, r.with_driver, r.insurance, r.total_amount, r.notes, \
    r.created_at, r.updated_at";

const DETAIL_JOIN: &str = "c.name AS customer_name, c.email AS customer_email, \
    c.phone AS customer_phone, v.name AS vehicle_name, v.category AS vehicle_category, \
    v.price AS vehicle_price \
    FROM rentals r \
    JOIN customers c ON c.id = r.customer_id \
    JOIN vehicles v ON v.id = r.vehicle_id";

#[derive(Debug, FromRow)]
struct RentalRow {
    id: Uuid,
    rental_code: String,
    customer_id: Uuid,
    vehicle_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    payment_status: String,
    with_driver: bool,
    insurance: bool,
    total_amount: Decimal,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = AppError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental {
            id: row.id,
            rental_code: row.rental_code,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status.parse::<RentalStatus>().map_err(AppError::Internal)?,
            payment_status: row
                .payment_status
                .parse::<PaymentStatus>()
                .map_err(AppError::Internal)?,
            with_driver: row.with_driver,
            insurance: row.insurance,
            total_amount: row.total_amount,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// Rental + columnas del JOIN con customers y vehicles
#[derive(Debug, FromRow)]
struct RentalDetailRow {
    #[sqlx(flatten)]
    rental: RentalRow,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    vehicle_name: String,
    vehicle_category: String,
    vehicle_price: Decimal,
}

impl TryFrom<RentalDetailRow> for RentalDetail {
    type Error = AppError;

    fn try_from(row: RentalDetailRow) -> Result<Self, Self::Error> {
        let rental = Rental::try_from(row.rental)?;
        Ok(RentalDetail {
            customer: CustomerSummary {
                id: rental.customer_id,
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
            vehicle: VehicleSummary {
                id: rental.vehicle_id,
                name: row.vehicle_name,
                category: row.vehicle_category,
                price: row.vehicle_price,
            },
            rental,
        })
    }
}

pub struct PgRentalRepository {
    pool: PgPool,
}

impl PgRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn max_code_sequence(&self) -> AppResult<i64> {
        let (max,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(MAX(substring(rental_code FROM 5)::BIGINT), 0)
            FROM rentals
            WHERE rental_code ~ '^RNT-[0-9]{1,18}$'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error reading rental identifiers"))?;

        Ok(max)
    }

    async fn create(&self, rental: NewRental) -> AppResult<Option<Rental>> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            r#"
            INSERT INTO rentals AS r (
                id, rental_code, customer_id, vehicle_id, start_date, end_date,
                status, payment_status, with_driver, insurance, total_amount, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', 'pending', $7, $8, $9, $10, $11, $11)
            ON CONFLICT (rental_code) DO NOTHING
            RETURNING {}
            "#,
            RENTAL_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&rental.rental_code)
        .bind(rental.customer_id)
        .bind(rental.vehicle_id)
        .bind(rental.start_date)
        .bind(rental.end_date)
        .bind(rental.with_driver)
        .bind(rental.insurance)
        .bind(rental.total_amount)
        .bind(&rental.notes)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creating rental"))?;

        row.map(Rental::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "SELECT {} FROM rentals r WHERE r.id = $1",
            RENTAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding rental"))?;

        row.map(Rental::try_from).transpose()
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<RentalDetail>> {
        let row = sqlx::query_as::<_, RentalDetailRow>(&format!(
            "SELECT {}, {} WHERE r.id = $1",
            RENTAL_COLUMNS, DETAIL_JOIN
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding rental detail"))?;

        row.map(RentalDetail::try_from).transpose()
    }

    async fn list(&self, filters: &RentalFilters) -> AppResult<Vec<RentalDetail>> {
        let rows = sqlx::query_as::<_, RentalDetailRow>(&format!(
            r#"
            SELECT {}, {}
            WHERE ($1::TEXT IS NULL OR r.status = $1)
              AND ($2::TEXT IS NULL OR r.payment_status = $2)
              AND ($3::UUID IS NULL OR r.vehicle_id = $3)
              AND ($4::UUID IS NULL OR r.customer_id = $4)
            ORDER BY r.created_at DESC
            "#,
            RENTAL_COLUMNS, DETAIL_JOIN
        ))
        .bind(filters.status.map(|s| s.as_str()))
        .bind(filters.payment_status.map(|p| p.as_str()))
        .bind(filters.vehicle_id)
        .bind(filters.customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listing rentals"))?;

        rows.into_iter().map(RentalDetail::try_from).collect()
    }

    async fn find_blocking_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<Rental>> {
        let rows = sqlx::query_as::<_, RentalRow>(&format!(
            r#"
            SELECT {} FROM rentals r
            WHERE r.vehicle_id = $1 AND r.status IN ('pending', 'active')
            ORDER BY r.start_date
            "#,
            RENTAL_COLUMNS
        ))
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding vehicle rentals"))?;

        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: RentalStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE rentals SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error updating rental status"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        Ok(())
    }

    async fn update_payment_status(&self, id: Uuid, payment_status: PaymentStatus) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE rentals SET payment_status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(payment_status.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "Error updating payment status"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error deleting rental"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error deleting rentals"))?;

        Ok(result.rows_affected())
    }
}
