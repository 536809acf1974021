use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod dto;
pub mod extractors;
pub mod gate;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/registro", post(handlers::registro))
        .route("/logout", get(handlers::logout))
        .route("/usuario", get(handlers::perfil))
        .route("/usuario/perfil", post(handlers::atualizar_perfil))
        .route("/usuario/senha", post(handlers::trocar_senha))
        .route("/usuario/acesso", post(handlers::solicitar_acesso))
        .route("/usuario/preferencias", post(handlers::salvar_preferencias))
}
