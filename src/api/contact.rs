use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub message: String,
}

/// Acknowledges a contact message. Nothing is stored or forwarded; only
/// presence of the three fields is checked here. The stricter rules live
/// in the form, see `schema::ContactPayload`.
pub async fn submit_contact(Json(request): Json<ContactRequest>) -> Result<Json<ContactResponse>> {
    let present = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.is_empty());

    if !present(&request.name) || !present(&request.email) || !present(&request.message) {
        return Err(AppError::InvalidInput(
            "Name, email, and message are required".to_string(),
        ));
    }

    Ok(Json(ContactResponse {
        message: "Contact form submitted successfully".to_string(),
    }))
}
