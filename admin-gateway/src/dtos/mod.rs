pub mod admin;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "permission-denied")]
    pub error: String,
    #[schema(example = "Only admins can grant admin roles.")]
    pub message: String,
}
