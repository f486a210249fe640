use log::error;
use std::path::Path;

use super::api::{self, ApiError};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(status_code: u16, status_text: &'static str, body: String) -> Self {
        Self {
            status_code,
            status_text,
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(method: &str, path: &str, db_path: &Path) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);

    match (method, route) {
        ("GET", "/pokemon/list") => match api::list_payload(db_path, path) {
            Ok(payload) => HttpResponse::json(200, "OK", payload),
            Err(err) => api_error_response(err),
        },
        (method, route) if method == "GET" && route.starts_with("/pokemon/details/") => {
            let id_segment = route.trim_start_matches("/pokemon/details/");
            match api::details_payload(db_path, id_segment) {
                Ok(payload) => HttpResponse::json(200, "OK", payload),
                Err(err) => api_error_response(err),
            }
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn api_error_response(err: ApiError) -> HttpResponse {
    match err {
        ApiError::BadRequest(message) => error_response(400, "Bad Request", &message),
        ApiError::NotFound(message) => error_response(404, "Not Found", message),
        ApiError::Internal(err) => {
            error!("query failed: {:#}", err);
            error_response(500, "Internal Server Error", "Internal server error")
        }
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    let body = format!(
        "{{\"error\": {}}}",
        serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
    );
    HttpResponse::json(status_code, status_text, body)
}
