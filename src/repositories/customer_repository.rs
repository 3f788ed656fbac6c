use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::CustomerRepository;
use crate::models::{Customer, CustomerChanges, CustomerFilters, CustomerStatus, NewCustomer};
use crate::utils::errors::{map_db_error, AppError, AppResult};

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, location, status, created_at";

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    location: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = AppError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            location: row.location,
            status: row.status.parse::<CustomerStatus>().map_err(AppError::Internal)?,
            created_at: row.created_at,
        })
    }
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {} FROM customers WHERE email = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding customer by email"))?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error finding customer"))?;

        row.map(Customer::try_from).transpose()
    }

    async fn create(&self, customer: NewCustomer) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            INSERT INTO customers (id, name, email, phone, location, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.location)
        .bind(customer.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creating customer"))?;

        row.try_into()
    }

    async fn list(&self, filters: &CustomerFilters) -> AppResult<Vec<Customer>> {
        let search = filters.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            SELECT {} FROM customers
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2)
            ORDER BY created_at DESC
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(filters.status.map(|s| s.as_str()))
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listing customers"))?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn update(&self, id: Uuid, changes: CustomerChanges) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            UPDATE customers
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                location = COALESCE($4, location),
                status = COALESCE($5, status)
            WHERE id = $1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.phone)
        .bind(changes.location)
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error updating customer"))?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error deleting customer"))?;

        Ok(result.rows_affected() > 0)
    }
}
