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
        .route("/jogo/pergunta", post(handlers::enviar_pergunta))
        .route("/admin", get(handlers::dashboard))
        .route("/admin/perguntas", get(handlers::listar_perguntas))
        .route(
            "/admin/perguntas/publicar",
            post(handlers::publicar_lote),
        )
        .route(
            "/admin/perguntas/:id/responder",
            post(handlers::responder_pergunta),
        )
        .route(
            "/admin/perguntas/:id/pendente",
            post(handlers::marcar_pendente),
        )
        .route(
            "/admin/perguntas/:id/arquivar",
            post(handlers::arquivar_pergunta),
        )
        .route(
            "/admin/perguntas/:id/publicar",
            post(handlers::publicar_pergunta),
        )
}
