use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::dto::UserInfo,
    auth::extractors::{Autenticado, SessionCtx},
    error::AppError,
    games::{
        dto::{JogoDetalhes, PaginaJogoResponse},
        repo::{
            AtualizacaoJogo, Avaliacao, CaracteristicaJogo, FaqJogo, ImagemJogo, Jogo,
            RequisitoJogo, TipoRequisito,
        },
        services,
    },
    state::AppState,
};

/// Game page: the active game with every related block the template
/// renders, in one response.
#[instrument(skip(state, ctx))]
pub async fn pagina_jogo(
    State(state): State<AppState>,
    mut ctx: SessionCtx,
) -> Result<impl IntoResponse, AppError> {
    let jogo = Jogo::find_ativo(&state.db)
        .await?
        .ok_or(AppError::NotFound("jogo"))?;

    let faqs = FaqJogo::visiveis(&state.db, jogo.id).await?;
    let caracteristicas = CaracteristicaJogo::list_by_jogo(&state.db, jogo.id).await?;
    let requisitos_minimos =
        RequisitoJogo::list_by_tipo(&state.db, jogo.id, TipoRequisito::Minimo).await?;
    let requisitos_recomendados =
        RequisitoJogo::list_by_tipo(&state.db, jogo.id, TipoRequisito::Recomendado).await?;
    let atualizacoes = AtualizacaoJogo::recentes(&state.db, jogo.id, 5).await?;
    let imagens = ImagemJogo::list_by_jogo(&state.db, jogo.id, 4).await?;
    let avaliacoes_especialistas = Avaliacao::especialistas(&state.db, jogo.id, 3).await?;
    let (media, total) = Avaliacao::resumo(&state.db, jogo.id).await?;
    let resumo = services::resumo_avaliacoes(media, total);

    let response = PaginaJogoResponse {
        jogo: JogoDetalhes::from(jogo),
        caracteristicas,
        requisitos_minimos,
        requisitos_recomendados,
        atualizacoes,
        faqs_por_categoria: services::agrupar_faqs_por_categoria(faqs),
        imagens,
        avaliacoes_especialistas,
        media_avaliacoes: resumo.media,
        total_avaliacoes: resumo.total,
        user_info: UserInfo::from_session(&ctx.session),
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    Ok((ctx.cookie(), Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct VisibilidadeRequest {
    pub visivel: bool,
}

#[derive(Debug, Deserialize)]
pub struct AtivacaoRequest {
    pub ativo: bool,
}

#[instrument(skip(state, _auth))]
pub async fn alternar_visibilidade_faq(
    State(state): State<AppState>,
    _auth: Autenticado,
    Path(id): Path<Uuid>,
    Json(payload): Json<VisibilidadeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let alteradas = FaqJogo::set_visivel(&state.db, id, payload.visivel).await?;
    if alteradas == 0 {
        return Err(AppError::NotFound("FAQ"));
    }
    Ok(Json(serde_json::json!({ "visivel": payload.visivel })))
}

#[instrument(skip(state, _auth))]
pub async fn alternar_ativacao_faq(
    State(state): State<AppState>,
    _auth: Autenticado,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtivacaoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let alteradas = FaqJogo::set_ativo(&state.db, id, payload.ativo).await?;
    if alteradas == 0 {
        return Err(AppError::NotFound("FAQ"));
    }
    Ok(Json(serde_json::json!({ "ativo": payload.ativo })))
}
