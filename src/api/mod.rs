use actix_web::web;
mod handlers;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::query_balances)
            .service(handlers::get_balances)
            .service(handlers::get_query_state),
    );
}
