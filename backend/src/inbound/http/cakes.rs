//! Cake catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/v1/cakes
//! GET    /api/v1/cakes
//! GET    /api/v1/cakes/{id}
//! PUT    /api/v1/cakes/{id}
//! DELETE /api/v1/cakes/{id}
//! ```
//!
//! Text fields in request bodies decode as [`SanitizedText`], which is the
//! field-level sanitization boundary.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Cake, CakeId, CakeRequest, SanitizedText};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminUser, AuthenticatedUser, Role};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const READ_ROLES: &[Role] = &[Role::Admin, Role::Customer];

/// Request payload for creating or replacing a cake.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CakePayload {
    #[schema(value_type = Option<String>, example = "Chocolate")]
    pub name: Option<SanitizedText>,
    #[schema(value_type = Option<f64>, example = 9.99)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "Rich dark chocolate sponge")]
    pub description: Option<SanitizedText>,
}

impl From<CakePayload> for CakeRequest {
    fn from(value: CakePayload) -> Self {
        Self {
            name: value.name,
            price: value.price,
            description: value.description,
        }
    }
}

/// Response payload for a stored cake.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CakeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Chocolate")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl From<Cake> for CakeResponse {
    fn from(value: Cake) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_owned(),
            price: value.price().amount(),
            description: value.description().map(str::to_owned),
        }
    }
}

/// Response payload for a newly created cake.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CakeCreatedResponse {
    #[schema(example = 1)]
    pub id: i32,
}

fn cake_location(id: CakeId) -> String {
    format!("/api/v1/cakes/{id}")
}

/// Create a cake.
#[utoipa::path(
    post,
    path = "/api/v1/cakes",
    request_body = CakePayload,
    responses(
        (
            status = 201,
            description = "Cake created",
            headers(("Location" = String, description = "URI of the new cake")),
            body = CakeCreatedResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BasicAuth" = [])),
    tags = ["cakes"],
    operation_id = "createCake"
)]
#[post("/cakes")]
pub async fn create_cake(
    admin: AdminUser,
    state: web::Data<HttpState>,
    payload: web::Json<CakePayload>,
) -> ApiResult<HttpResponse> {
    let id = state
        .cakes
        .add_new_cake(payload.into_inner().into())
        .await?;
    info!(cake_id = %id, username = admin.user().username(), "cake created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, cake_location(id)))
        .json(CakeCreatedResponse { id: id.get() }))
}

/// List every cake.
#[utoipa::path(
    get,
    path = "/api/v1/cakes",
    responses(
        (status = 200, description = "All cakes in identifier order", body = [CakeResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BasicAuth" = [])),
    tags = ["cakes"],
    operation_id = "listCakes"
)]
#[get("/cakes")]
pub async fn list_cakes(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CakeResponse>>> {
    user.require_any(READ_ROLES)?;
    let cakes = state.cakes_query.get_all_cakes().await?;
    Ok(web::Json(cakes.into_iter().map(CakeResponse::from).collect()))
}

/// Fetch one cake.
#[utoipa::path(
    get,
    path = "/api/v1/cakes/{id}",
    params(("id" = i32, Path, description = "Cake identifier")),
    responses(
        (status = 200, description = "Cake", body = CakeResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Cake not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BasicAuth" = [])),
    tags = ["cakes"],
    operation_id = "getCake"
)]
#[get("/cakes/{id}")]
pub async fn get_cake(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CakeResponse>> {
    user.require_any(READ_ROLES)?;
    let cake = state
        .cakes_query
        .get_cake(CakeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CakeResponse::from(cake)))
}

/// Replace every mutable field of a cake.
#[utoipa::path(
    put,
    path = "/api/v1/cakes/{id}",
    params(("id" = i32, Path, description = "Cake identifier")),
    request_body = CakePayload,
    responses(
        (status = 200, description = "Updated cake as stored", body = CakeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Cake not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BasicAuth" = [])),
    tags = ["cakes"],
    operation_id = "updateCake"
)]
#[put("/cakes/{id}")]
pub async fn update_cake(
    admin: AdminUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CakePayload>,
) -> ApiResult<web::Json<CakeResponse>> {
    let id = CakeId::new(path.into_inner());
    let cake = state
        .cakes
        .update_cake(id, payload.into_inner().into())
        .await?;
    info!(cake_id = %id, username = admin.user().username(), "cake updated");
    Ok(web::Json(CakeResponse::from(cake)))
}

/// Remove a cake.
#[utoipa::path(
    delete,
    path = "/api/v1/cakes/{id}",
    params(("id" = i32, Path, description = "Cake identifier")),
    responses(
        (status = 204, description = "Cake deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Cake not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    security(("BasicAuth" = [])),
    tags = ["cakes"],
    operation_id = "deleteCake"
)]
#[delete("/cakes/{id}")]
pub async fn delete_cake(
    admin: AdminUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CakeId::new(path.into_inner());
    state.cakes.delete_cake(id).await?;
    info!(cake_id = %id, username = admin.user().username(), "cake deleted");
    Ok(HttpResponse::NoContent().finish())
}
