use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{json, Json, Value};
use rocket::Request;

/// Rocket answers 422 when a guard understood the request but could not use
/// it. For clients every such case is a malformed request.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::BadRequest,
        Json(json!({
            "errors": [{ "param": "body", "msg": format!("Malformed request to {}", req.uri()) }]
        })),
    )
}
