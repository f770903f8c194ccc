use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::orders::OrderHistoryQuery;
use crate::formatting::display_offset;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, orders as orders_service};

#[get("/orders")]
pub async fn show_orders(
    query: web::Query<OrderHistoryQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let offset = display_offset(server_config.display_utc_offset_minutes);

    match orders_service::load_order_history(repo.get_ref(), &user, query.into_inner(), offset) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "orders",
                &server_config.auth_service_url,
            );
            context.insert("history", &data.history);
            context.insert("selection", &data.selection);

            render_template(&tera, "orders/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load order history: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/orders/{order_id}/reorder")]
pub async fn reorder_order(
    order_id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::reorder(repo.get_ref(), &user, &order_id) {
        Ok(Some(target_path)) => redirect(&target_path),
        Ok(None) => redirect("/orders"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Pedido não encontrado.").send();
            redirect("/orders")
        }
        Err(err) => {
            log::error!("Failed to reorder: {err}");
            FlashMessage::error("Não foi possível adicionar o pedido à sacola.").send();
            redirect("/orders")
        }
    }
}
