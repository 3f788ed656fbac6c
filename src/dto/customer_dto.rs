use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 30))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}
