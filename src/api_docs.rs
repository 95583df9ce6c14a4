use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::sales::get_summary,
        api::sales::get_all_summaries,
        api::sales::get_charts_data,
        api::sales::create_sale_transaction,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "storefront", description = "Storefront API")
    )
)]
pub struct ApiDoc;
