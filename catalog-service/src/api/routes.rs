//! Request handlers for the `/products` resource.
//!
//! Create and update accept multipart forms (text fields plus optional
//! `image` / `profileImage` files) so sellers can either link an external
//! image or upload one in the same request.

use axum::{
    extract::{multipart::Field, Extension, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::auth::{AuthenticatedActor, Role};
use crate::api::error::{json_error, service_error_to_response};
use crate::api::AppState;
use crate::orchestrator::{CreateProductInput, ImageUpload, UpdateProductInput};

/// Multipart form fields accepted by create and update.
#[derive(Default)]
struct ProductForm {
    title: Option<String>,
    description: Option<String>,
    category_id: Option<Uuid>,
    price: Option<Decimal>,
    quantity: Option<i32>,
    image_url: Option<String>,
    profile_url: Option<String>,
    image: Option<ImageUpload>,
    profile_image: Option<ImageUpload>,
}

impl ProductForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            json_error(
                StatusCode::BAD_REQUEST,
                format!("Malformed multipart request: {}", e),
            )
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "category_id" => {
                    form.category_id = Some(parse_field(&name, read_text(field).await?)?)
                }
                "price" => form.price = Some(parse_field(&name, read_text(field).await?)?),
                "quantity" => form.quantity = Some(parse_field(&name, read_text(field).await?)?),
                "imageUrl" => form.image_url = Some(read_text(field).await?),
                "profileUrl" => form.profile_url = Some(read_text(field).await?),
                "image" => form.image = read_file(field).await?,
                "profileImage" => form.profile_image = read_file(field).await?,
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_create_input(self) -> Result<CreateProductInput, Response> {
        Ok(CreateProductInput {
            title: self.title.ok_or_else(|| missing("title"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            category_id: self.category_id.ok_or_else(|| missing("category_id"))?,
            price: self.price.ok_or_else(|| missing("price"))?,
            quantity: self.quantity.ok_or_else(|| missing("quantity"))?,
            image_url: self.image_url,
            image: self.image,
            profile_url: self.profile_url,
            profile_image: self.profile_image,
        })
    }

    fn into_update_input(self) -> UpdateProductInput {
        UpdateProductInput {
            title: self.title,
            description: self.description,
            category_id: self.category_id,
            price: self.price,
            quantity: self.quantity,
            image_url: self.image_url,
            image: self.image,
            profile_url: self.profile_url,
        }
    }
}

async fn read_text(field: Field<'_>) -> Result<String, Response> {
    field.text().await.map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            format!("Failed to read form field: {}", e),
        )
    })
}

/// Read a file part; an empty payload counts as "no file supplied".
async fn read_file(field: Field<'_>) -> Result<Option<ImageUpload>, Response> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = field.bytes().await.map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            format!("Failed to read uploaded file: {}", e),
        )
    })?;

    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        bytes: bytes.to_vec(),
        filename,
        content_type,
    }))
}

fn parse_field<T: std::str::FromStr>(name: &str, value: String) -> Result<T, Response> {
    value.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid value for field '{}'", name),
        )
    })
}

fn missing(name: &str) -> Response {
    json_error(
        StatusCode::BAD_REQUEST,
        format!("Missing required field '{}'", name),
    )
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
    multipart: Multipart,
) -> Response {
    if let Err(response) = actor.require_role(&[Role::ShopOwner]) {
        return response;
    }

    let form = match ProductForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let input = match form.into_create_input() {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.orchestrator.create(input, actor.user_id).await {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
) -> Response {
    if let Err(response) = actor.require_role(&[Role::User, Role::ShopOwner]) {
        return response;
    }

    match state.orchestrator.list().await {
        Ok(documents) => Json(documents).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

pub async fn get_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require_role(&[Role::User, Role::ShopOwner]) {
        return response;
    }

    match state.orchestrator.get(id).await {
        Ok(document) => Json(document).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Response {
    if let Err(response) = actor.require_role(&[Role::ShopOwner]) {
        return response;
    }

    let form = match ProductForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state
        .orchestrator
        .update(id, form.into_update_input(), actor.user_id)
        .await
    {
        Ok(document) => Json(document).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require_role(&[Role::ShopOwner]) {
        return response;
    }

    match state.orchestrator.delete(id, actor.user_id).await {
        Ok(()) => Json(serde_json::json!({ "message": "Product deleted successfully" }))
            .into_response(),
        Err(e) => service_error_to_response(e),
    }
}
