use crate::state::AppState;
use axum::{routing::get, Router};

pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artigos", get(handlers::listar_artigos))
        .route("/artigos/:id", get(handlers::detalhar_artigo))
        .route("/desastres", get(handlers::listar_desastres))
        .route("/desastres/:id", get(handlers::detalhar_desastre))
        .route("/acontecimentos", get(handlers::listar_acontecimentos))
}
