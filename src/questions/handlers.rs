use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::dto::{DashboardResponse, NoticeResponse, UserInfo},
    auth::extractors::{Autenticado, SessionCtx},
    auth::repo::Usuario,
    error::AppError,
    games::repo::{FaqJogo, Jogo},
    questions::{
        dto::{
            EnviarPerguntaRequest, FiltroPerguntas, ListaPerguntasResponse, PerguntaView,
            PublicacaoLoteResponse, PublicarLoteRequest, ResponderRequest,
        },
        repo::{PerguntaUsuario, StatusPergunta},
        services,
    },
    session::Severity,
    state::AppState,
};

/// Public question form on the game page. Submits against the active
/// game; an authenticated visitor is attached as the author.
#[instrument(skip(state, ctx, payload))]
pub async fn enviar_pergunta(
    State(state): State<AppState>,
    mut ctx: SessionCtx,
    Json(payload): Json<EnviarPerguntaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let jogo = Jogo::find_ativo(&state.db)
        .await?
        .ok_or(AppError::NotFound("jogo"))?;

    services::enviar(
        &state.db,
        jogo.id,
        &payload.pergunta,
        &payload.email,
        ctx.session.usuario_id,
    )
    .await?;

    ctx.session.push_flash(
        Severity::Success,
        "Pergunta enviada com sucesso! Responderemos em breve por email.",
    );
    let response = NoticeResponse {
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    Ok((ctx.cookie(), Json(response)))
}

/// Administrative dashboard. Gated on authentication only; any logged-in
/// user passes, regardless of role.
#[instrument(skip(state, auth))]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: Autenticado,
) -> Result<impl IntoResponse, AppError> {
    let Autenticado { quem: _, mut ctx } = auth;
    let total_usuarios = Usuario::count(&state.db).await?;
    let perguntas_pendentes =
        PerguntaUsuario::count_by_status(&state.db, StatusPergunta::Pendente).await?;
    let total_faqs = FaqJogo::count(&state.db).await?;

    let response = DashboardResponse {
        user_info: UserInfo::from_session(&ctx.session),
        total_usuarios,
        perguntas_pendentes,
        total_faqs,
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    Ok((ctx.cookie(), Json(response)))
}

#[instrument(skip(state, auth))]
pub async fn listar_perguntas(
    State(state): State<AppState>,
    auth: Autenticado,
    Query(filtro): Query<FiltroPerguntas>,
) -> Result<impl IntoResponse, AppError> {
    let Autenticado { quem: _, mut ctx } = auth;
    let perguntas = PerguntaUsuario::list(&state.db, filtro.status).await?;

    let response = ListaPerguntasResponse {
        perguntas: perguntas.into_iter().map(PerguntaView::from).collect(),
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    Ok((ctx.cookie(), Json(response)))
}

#[instrument(skip(state, auth, payload))]
pub async fn responder_pergunta(
    State(state): State<AppState>,
    auth: Autenticado,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResponderRequest>,
) -> Result<Json<PerguntaView>, AppError> {
    let pergunta =
        services::responder(&state.db, id, &payload.resposta, auth.quem.usuario_id).await?;
    Ok(Json(PerguntaView::from(pergunta)))
}

#[instrument(skip(state, _auth))]
pub async fn marcar_pendente(
    State(state): State<AppState>,
    _auth: Autenticado,
    Path(id): Path<Uuid>,
) -> Result<Json<PerguntaView>, AppError> {
    let pergunta = services::marcar_pendente(&state.db, id).await?;
    Ok(Json(PerguntaView::from(pergunta)))
}

#[instrument(skip(state, _auth))]
pub async fn arquivar_pergunta(
    State(state): State<AppState>,
    _auth: Autenticado,
    Path(id): Path<Uuid>,
) -> Result<Json<PerguntaView>, AppError> {
    let pergunta = services::arquivar(&state.db, id).await?;
    Ok(Json(PerguntaView::from(pergunta)))
}

#[instrument(skip(state, _auth))]
pub async fn publicar_pergunta(
    State(state): State<AppState>,
    _auth: Autenticado,
    Path(id): Path<Uuid>,
) -> Result<Json<FaqJogo>, AppError> {
    let faq = services::publicar(&state.db, id).await?;
    Ok(Json(faq))
}

#[instrument(skip(state, _auth, payload))]
pub async fn publicar_lote(
    State(state): State<AppState>,
    _auth: Autenticado,
    Json(payload): Json<PublicarLoteRequest>,
) -> Result<Json<PublicacaoLoteResponse>, AppError> {
    let relatorio = services::publicar_lote(&state.db, &payload.ids).await?;
    Ok(Json(PublicacaoLoteResponse {
        mensagem: format!(
            "{} pergunta(s) publicada(s) como FAQ.",
            relatorio.publicadas.len()
        ),
        publicadas: relatorio.publicadas,
        ignoradas: relatorio.ignoradas,
    }))
}
