use actix_web::{HttpResponse, Responder, get, web};

use crate::formatting::display_offset;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, orders as orders_service};

#[get("/v1/orders")]
pub async fn api_v1_orders(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let offset = display_offset(server_config.display_utc_offset_minutes);

    match orders_service::list_order_cards(repo.get_ref(), &user, offset) {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/orders/{order_id}")]
pub async fn api_v1_order(
    order_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let offset = display_offset(server_config.display_utc_offset_minutes);

    match orders_service::load_order_detail(repo.get_ref(), &user, &order_id, offset) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Pending reorder for the ordering flow to prefill the cart.
#[get("/v1/reorder")]
pub async fn api_v1_reorder(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::pending_reorder(repo.get_ref(), &user) {
        Ok(Some(payload)) => HttpResponse::Ok().json(payload),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to read pending reorder: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
