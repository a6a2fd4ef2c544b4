use actix_web::{get, post, web, HttpResponse};

use crate::{
    errors::CustomError,
    models::{
        api_response::success_response,
        query::{BalanceQueryRequest, QueryOutcome},
    },
    services::query_service::QueryService,
};

#[post("/balances")]
async fn query_balances(
    service: web::Data<QueryService>,
    query_req: web::Json<BalanceQueryRequest>,
) -> Result<HttpResponse, CustomError> {
    into_response(service.run_query(&query_req.address).await)
}

#[get("/balances/{address}")]
async fn get_balances(
    service: web::Data<QueryService>,
    address: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    into_response(service.run_query(&address).await)
}

#[get("/query")]
async fn get_query_state(service: web::Data<QueryService>) -> HttpResponse {
    success_response(service.state().await)
}

fn into_response(outcome: QueryOutcome) -> Result<HttpResponse, CustomError> {
    match outcome {
        QueryOutcome::ValidationError { message } => Err(CustomError::ValidationError(message)),
        QueryOutcome::ProviderFailure { message } => Err(CustomError::ProviderFailure(message)),
        outcome => Ok(success_response(outcome)),
    }
}
