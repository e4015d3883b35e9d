use serde::Serialize;

/// Success envelope: `{"success":true,"data":...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse { success: true, data }
    }
}

/// Validation failure envelope: `{"success":false,"errors":[...]}`.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<String>) -> Self {
        ValidationErrorResponse { success: false, errors }
    }
}

/// Opaque server failure envelope: `{"success":false,"error":"Server error"}`.
#[derive(Debug, Serialize)]
pub struct ServerErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ServerErrorResponse {
    pub fn new() -> Self {
        ServerErrorResponse {
            success: false,
            error: "Server error".to_string(),
        }
    }
}

impl Default for ServerErrorResponse {
    fn default() -> Self {
        Self::new()
    }
}
