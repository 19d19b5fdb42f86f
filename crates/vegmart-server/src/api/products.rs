use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vegmart_core::{browse, BrowseFilter, CatalogProduct};
use vegmart_db::{NewProduct, ProductRow, ProductUpdate};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    product_id: i64,
    product_name: String,
    category: Option<String>,
    final_price: Decimal,
    stock: i32,
    in_stock: bool,
    image_url: Option<String>,
    location: String,
    farmer_name: String,
    farmer_email: Option<String>,
}

impl From<&CatalogProduct> for ProductItem {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            category: product.category.clone(),
            final_price: product.final_price(),
            stock: product.stock,
            in_stock: product.in_stock(),
            image_url: product.image_url.clone(),
            location: product.effective_location().to_string(),
            farmer_name: product.farmer_name().to_string(),
            farmer_email: product.farmer.as_ref().map(|f| f.email.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    /// Customer location; absent or empty disables the range filter.
    pub location: Option<String>,
    pub q: Option<String>,
    /// Tier threshold; only the discrete values 0/10/50/500/1000 are
    /// distinguished, so e.g. 60 and 100 behave identically.
    pub max_distance: Option<u32>,
    /// Number of newest available products loaded before filtering.
    pub limit: Option<i64>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let rows = vegmart_db::list_available_products(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &vegmart_db::DbError::from(e)))?;

    let products: Vec<CatalogProduct> = rows.into_iter().map(CatalogProduct::from).collect();
    let filter = BrowseFilter {
        search: query.q,
        customer_location: query.location,
        max_distance: query.max_distance.unwrap_or(state.max_delivery_distance),
    };

    let data: Vec<ProductItem> = browse(&products, &filter)
        .into_iter()
        .map(ProductItem::from)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// A product as stored, returned by the write endpoints.
#[derive(Debug, Serialize)]
pub(super) struct StoredProductItem {
    product_id: i64,
    public_id: uuid::Uuid,
    farmer_email: Option<String>,
    product_name: String,
    category: Option<String>,
    price: Decimal,
    margin_percentage: Option<Decimal>,
    stock: i32,
    is_available: bool,
    image_url: Option<String>,
    location: Option<String>,
}

impl From<ProductRow> for StoredProductItem {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.id,
            public_id: row.public_id,
            farmer_email: row.farmer_email,
            product_name: row.name,
            category: row.category,
            price: row.price,
            margin_percentage: row.margin_percentage,
            stock: row.stock,
            is_available: row.is_available,
            image_url: row.image_url,
            location: row.location,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateProductBody {
    pub farmer_email: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub margin_percentage: Option<Decimal>,
    #[serde(default)]
    pub stock: i32,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
    /// Omit or leave blank to use the farmer's location.
    pub location: Option<String>,
}

/// List a new product. The observed-location cache is not refreshed.
pub(super) async fn create_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateProductBody>,
) -> Result<(StatusCode, Json<ApiResponse<StoredProductItem>>), ApiError> {
    let product = NewProduct {
        farmer_email: body.farmer_email,
        name: body.name,
        category: body.category,
        price: body.price,
        margin_percentage: body.margin_percentage,
        stock: body.stock,
        is_available: body.is_available.unwrap_or(true),
        image_url: body.image_url,
        location: body.location,
    };

    let row = vegmart_db::create_product(&state.pool, &product)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: StoredProductItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateProductBody {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub margin_percentage: Option<Decimal>,
    pub stock: Option<i32>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
    pub location: Option<String>,
}

pub(super) async fn update_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProductBody>,
) -> Result<Json<ApiResponse<StoredProductItem>>, ApiError> {
    let update = ProductUpdate {
        name: body.name,
        category: body.category,
        price: body.price,
        margin_percentage: body.margin_percentage,
        stock: body.stock,
        is_available: body.is_available,
        image_url: body.image_url,
        location: body.location,
    };

    let row = vegmart_db::update_product(&state.pool, id, &update)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: StoredProductItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
