// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Customers ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::count_total,
        handlers::customers::count_by_contract_status,
        handlers::customers::search_customers,
        handlers::customers::update_customer,

        // --- Health ---
        handlers::health::health,
    ),
    components(
        schemas(
            models::customer::Customer,
            models::customer::NewCustomer,
            models::customer::CustomerUpdate,
            models::customer::MessageResponse,
            models::customer::TotalResponse,
            models::customer::CountResponse,
        )
    ),
    tags(
        (name = "Customers", description = "Lead records collected from Instagram"),
        (name = "Health", description = "Liveness and database reachability")
    )
)]
pub struct ApiDoc;
