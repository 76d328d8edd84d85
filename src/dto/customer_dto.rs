use serde::Deserialize;
use validator::Validate;

/// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 300))]
    pub address: Option<String>,
}

/// Request para actualizar un cliente existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 300))]
    pub address: Option<String>,
}
