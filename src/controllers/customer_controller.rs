use uuid::Uuid;
use validator::Validate;

use crate::dto::customer_dto::{CustomerListQuery, UpdateCustomerRequest};
use crate::dto::ApiResponse;
use crate::models::{Customer, CustomerChanges, CustomerFilters, CustomerStatus};
use crate::repositories::Repositories;
use crate::utils::errors::{AppError, AppResult};

pub struct CustomerController {
    repos: Repositories,
}

impl CustomerController {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn list(&self, query: CustomerListQuery) -> AppResult<Vec<Customer>> {
        let filters = CustomerFilters {
            status: parse_status(query.status.as_deref())?,
            search: query.search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        };
        self.repos.customers.list(&filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Customer> {
        self.repos
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
    }

    /// El email no se modifica: identifica al cliente en las reservas
    pub async fn update(&self, id: Uuid, request: UpdateCustomerRequest) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;

        let changes = CustomerChanges {
            name: request.name,
            phone: request.phone,
            location: request.location,
            status: parse_status(request.status.as_deref())?,
        };

        let customer = self.repos.customers.update(id, changes).await?;
        Ok(ApiResponse::success_with_message(customer, "Customer updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repos.customers.delete(id).await? {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }
        tracing::info!("🗑️ Cliente {} eliminado", id);
        Ok(())
    }
}

fn parse_status(value: Option<&str>) -> AppResult<Option<CustomerStatus>> {
    value.map(str::parse).transpose().map_err(AppError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCustomer;
    use crate::repositories::InMemoryStore;
    use std::sync::Arc;

    async fn setup() -> (CustomerController, Customer) {
        let repos = Repositories::in_memory(Arc::new(InMemoryStore::new()));
        let customer = repos
            .customers
            .create(NewCustomer {
                name: "Lucía Gómez".to_string(),
                email: "lucia@test.com".to_string(),
                phone: "611".to_string(),
                location: "Sevilla".to_string(),
                status: CustomerStatus::Active,
            })
            .await
            .unwrap();
        (CustomerController::new(repos), customer)
    }

    #[tokio::test]
    async fn test_search_and_status_filter() {
        let (controller, _) = setup().await;

        let found = controller
            .list(CustomerListQuery { search: Some("LUCÍA".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let inactive = controller
            .list(CustomerListQuery { status: Some("inactive".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert!(inactive.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (controller, customer) = setup().await;

        let updated = controller
            .update(
                customer.id,
                UpdateCustomerRequest {
                    status: Some("inactive".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(updated.status, CustomerStatus::Inactive);
        assert_eq!(updated.email, "lucia@test.com");

        controller.delete(customer.id).await.unwrap();
        assert!(matches!(controller.delete(customer.id).await, Err(AppError::NotFound(_))));
    }
}
