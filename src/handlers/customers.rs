// src/handlers/customers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::{ApiError, ErrorContext},
        extract::AppJson,
    },
    config::AppState,
    models::customer::{
        ContractFilter, CountResponse, Customer, CustomerUpdate, MessageResponse, NewCustomer,
        SearchQuery, TotalResponse,
    },
};

const CREATE_CTX: ErrorContext = ErrorContext::new("customer create failed", "Bir hata oluştu");
const LIST_CTX: ErrorContext =
    ErrorContext::new("failed to load customers", "Müşteri verileri alınamadı");
const TOTAL_CTX: ErrorContext =
    ErrorContext::new("failed to count customers", "Bir hata oluştu");
const CONTRACTED_CTX: ErrorContext =
    ErrorContext::new("failed to count customers by contract status", "Bir hata oluştu.");
const SEARCH_CTX: ErrorContext = ErrorContext::new(
    "customer search failed",
    "Müşteri araması sırasında bir hata oluştu.",
);
const UPDATE_CTX: ErrorContext = ErrorContext::new("customer update failed", "Bir hata oluştu.");

// POST /api/instagram
#[utoipa::path(
    post,
    path = "/api/instagram",
    tag = "Customers",
    request_body = NewCustomer,
    responses(
        (status = 201, description = "Customer stored", body = MessageResponse),
        (status = 400, description = "Malformed body, missing fields or duplicate customer"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<NewCustomer>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .customer_service
        .create_customer(&app_state.db_pool, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(CREATE_CTX))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Bilgi başarıyla kaydedildi")),
    ))
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    params(ContractFilter),
    responses(
        (status = 200, description = "First page of customers", body = Vec<Customer>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(filter): Query<ContractFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .customer_service
        .list_customers(&app_state.db_pool, filter.flag())
        .await
        .map_err(|app_err| app_err.to_api_error(LIST_CTX))?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/total
#[utoipa::path(
    get,
    path = "/api/customers/total",
    tag = "Customers",
    responses(
        (status = 200, description = "Number of stored customers", body = TotalResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn count_total(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let total = app_state
        .customer_service
        .count_total(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(TOTAL_CTX))?;

    Ok((StatusCode::OK, Json(TotalResponse { total })))
}

// GET /api/customers/contracted
#[utoipa::path(
    get,
    path = "/api/customers/contracted",
    tag = "Customers",
    params(ContractFilter),
    responses(
        (status = 200, description = "Customers with the given contract status", body = CountResponse),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn count_by_contract_status(
    State(app_state): State<AppState>,
    Query(filter): Query<ContractFilter>,
) -> Result<impl IntoResponse, ApiError> {
    // Absent counts as "not contracted".
    let is_contracted = filter.flag().unwrap_or(false);

    let count = app_state
        .customer_service
        .count_by_contract_status(&app_state.db_pool, is_contracted)
        .await
        .map_err(|app_err| app_err.to_api_error(CONTRACTED_CTX))?;

    Ok((StatusCode::OK, Json(CountResponse { count })))
}

// GET /api/search-customers
#[utoipa::path(
    get,
    path = "/api/search-customers",
    tag = "Customers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching customers", body = Vec<Customer>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn search_customers(
    State(app_state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .customer_service
        .search_customers(&app_state.db_pool, search.query.as_deref().unwrap_or_default())
        .await
        .map_err(|app_err| app_err.to_api_error(SEARCH_CTX))?;

    Ok((StatusCode::OK, Json(customers)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    request_body = CustomerUpdate,
    params(
        ("id" = String, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "Customer replaced", body = MessageResponse),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "No customer with this id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CustomerUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .customer_service
        .update_customer(&app_state.db_pool, &id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(UPDATE_CTX))?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Müşteri başarıyla güncellendi.")),
    ))
}
