use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    content::repo::{Acontecimento, Artigo, Desastre, Risco, TopicoArtigo, TopicoDesastre},
    error::AppError,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ArtigoDetalhes {
    #[serde(flatten)]
    pub artigo: Artigo,
    pub topicos: Vec<TopicoArtigo>,
}

#[derive(Debug, Serialize)]
pub struct DesastreDetalhes {
    #[serde(flatten)]
    pub desastre: Desastre,
    pub topicos: Vec<TopicoDesastre>,
    pub riscos: Vec<Risco>,
}

#[instrument(skip(state))]
pub async fn listar_artigos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Artigo>>, AppError> {
    Ok(Json(Artigo::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn detalhar_artigo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtigoDetalhes>, AppError> {
    let artigo = Artigo::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("artigo"))?;
    let topicos = Artigo::topicos(&state.db, artigo.id).await?;
    Ok(Json(ArtigoDetalhes { artigo, topicos }))
}

#[instrument(skip(state))]
pub async fn listar_desastres(
    State(state): State<AppState>,
) -> Result<Json<Vec<Desastre>>, AppError> {
    Ok(Json(Desastre::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn detalhar_desastre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DesastreDetalhes>, AppError> {
    let desastre = Desastre::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("desastre"))?;
    let topicos = Desastre::topicos(&state.db, desastre.id).await?;
    let riscos = Desastre::riscos(&state.db, desastre.id).await?;
    Ok(Json(DesastreDetalhes {
        desastre,
        topicos,
        riscos,
    }))
}

#[instrument(skip(state))]
pub async fn listar_acontecimentos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Acontecimento>>, AppError> {
    Ok(Json(Acontecimento::list(&state.db).await?))
}
