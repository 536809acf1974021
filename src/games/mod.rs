use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jogo", get(handlers::pagina_jogo))
        .route(
            "/admin/faqs/:id/visivel",
            post(handlers::alternar_visibilidade_faq),
        )
        .route(
            "/admin/faqs/:id/ativo",
            post(handlers::alternar_ativacao_faq),
        )
}
