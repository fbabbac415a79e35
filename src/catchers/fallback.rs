use rocket::serde::json::{json, Json, Value};
use rocket::Request;

#[catch(400)]
pub fn bad_request(req: &Request) -> Json<Value> {
    Json(json!({
        "errors": [{ "param": "body", "msg": format!("Malformed request to {}", req.uri()) }]
    }))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<Value> {
    Json(json!({ "error": format!("No route for {} {}", req.method(), req.uri()) }))
}

#[catch(500)]
pub fn internal_error() -> Json<Value> {
    Json(json!({ "error": "Internal server error" }))
}

#[catch(503)]
pub fn service_unavailable() -> Json<Value> {
    Json(json!({ "error": "Service unavailable" }))
}
