use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::ApiError;

// Envelope shared by every route, success or failure
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub code: u16,
    pub result: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: "SUCCESS".to_string(),
            code: 200,
            result: Some(result),
            error: None,
        }
    }
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}
