pub mod auth;
pub mod documents;
pub mod health;
pub mod metadata;

use serde::Serialize;
use utoipa::ToSchema;

/// Plain confirmation body for operations with no payload to return.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
