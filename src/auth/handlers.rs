use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            AtualizarPerfilRequest, IndexResponse, LoginPageResponse, LoginRequest,
            NoticeResponse, PerfilResponse, RegistroRequest, SessaoResponse,
            SolicitarAcessoRequest, TrocarSenhaRequest, UserInfo, UsuarioPublico,
        },
        extractors::{Autenticado, SessionCtx},
        repo::Usuario,
        services,
    },
    error::AppError,
    session::{ProfileField, Severity},
    state::AppState,
};

#[instrument(skip(ctx))]
pub async fn index(mut ctx: SessionCtx) -> impl IntoResponse {
    let response = IndexResponse {
        user_info: UserInfo::from_session(&ctx.session),
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    (ctx.cookie(), Json(response))
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    tab: Option<String>,
}

#[instrument(skip(ctx))]
pub async fn login_page(mut ctx: SessionCtx, Query(query): Query<LoginPageQuery>) -> Response {
    // An already-authenticated visitor goes straight back to the index.
    if ctx.session.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    let response = LoginPageResponse {
        active_tab: query.tab.unwrap_or_else(|| "login".into()),
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    (ctx.cookie(), Json(response)).into_response()
}

#[instrument(skip(state, ctx, payload))]
pub async fn login(
    State(state): State<AppState>,
    mut ctx: SessionCtx,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = services::login(&state.db, &payload.email, &payload.senha).await?;

    ctx.session.establish(&usuario);
    ctx.session
        .push_flash(Severity::Success, format!("Bem-vindo(a), {}!", usuario.nome));
    ctx.save();

    Ok((
        ctx.cookie(),
        Json(SessaoResponse {
            usuario: UsuarioPublico::from(&usuario),
        }),
    ))
}

#[instrument(skip(state, ctx, payload))]
pub async fn registro(
    State(state): State<AppState>,
    mut ctx: SessionCtx,
    Json(payload): Json<RegistroRequest>,
) -> Result<impl IntoResponse, AppError> {
    let usuario = services::registrar(
        &state.db,
        &payload.nome,
        &payload.email,
        &payload.senha,
        &payload.confirmar_senha,
        payload.imagem.as_deref(),
    )
    .await?;

    // Automatic login after registration.
    ctx.session.establish(&usuario);
    ctx.session
        .push_flash(Severity::Success, "Cadastro realizado com sucesso!");
    ctx.save();

    Ok((
        ctx.cookie(),
        Json(SessaoResponse {
            usuario: UsuarioPublico::from(&usuario),
        }),
    ))
}

#[instrument(skip(ctx))]
pub async fn logout(mut ctx: SessionCtx) -> impl IntoResponse {
    ctx.session.clear();
    ctx.session
        .push_flash(Severity::Success, "Logout realizado com sucesso!");
    ctx.save();
    (ctx.cookie(), Redirect::to("/"))
}

#[instrument(skip(state, auth))]
pub async fn perfil(
    State(state): State<AppState>,
    auth: Autenticado,
) -> Result<impl IntoResponse, AppError> {
    let Autenticado { quem, mut ctx } = auth;
    let usuario = Usuario::find_by_id(&state.db, quem.usuario_id)
        .await?
        .ok_or(AppError::NotFound("usuário"))?;

    let response = PerfilResponse {
        usuario: UsuarioPublico::from(&usuario),
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    Ok((ctx.cookie(), Json(response)))
}

#[instrument(skip(state, auth, payload))]
pub async fn atualizar_perfil(
    State(state): State<AppState>,
    auth: Autenticado,
    Json(payload): Json<AtualizarPerfilRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Autenticado { quem, mut ctx } = auth;
    let usuario = Usuario::find_by_id(&state.db, quem.usuario_id)
        .await?
        .ok_or(AppError::NotFound("usuário"))?;

    let atualizado = services::atualizar_perfil(
        &state.db,
        &usuario,
        &payload.nome,
        &payload.email,
        payload.tipo.as_deref(),
    )
    .await?;

    // Keep the denormalized session copies consistent with the row we
    // just saved, without a second read.
    ctx.session
        .sync_field(ProfileField::Nome(atualizado.nome.clone()));
    ctx.session
        .sync_field(ProfileField::Email(atualizado.email.clone()));
    ctx.session
        .sync_field(ProfileField::Tipo(atualizado.tipo.clone()));
    ctx.session
        .push_flash(Severity::Success, "Perfil atualizado com sucesso!");
    ctx.save();

    Ok((
        ctx.cookie(),
        Json(SessaoResponse {
            usuario: UsuarioPublico::from(&atualizado),
        }),
    ))
}

#[instrument(skip(state, auth, payload))]
pub async fn trocar_senha(
    State(state): State<AppState>,
    auth: Autenticado,
    Json(payload): Json<TrocarSenhaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Autenticado { quem, mut ctx } = auth;
    let usuario = Usuario::find_by_id(&state.db, quem.usuario_id)
        .await?
        .ok_or(AppError::NotFound("usuário"))?;

    services::trocar_senha(
        &state.db,
        &usuario,
        &payload.senha_atual,
        &payload.nova_senha,
        &payload.confirmar_senha,
    )
    .await?;

    ctx.session
        .push_flash(Severity::Success, "Senha alterada com sucesso!");
    let response = NoticeResponse {
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();

    Ok((ctx.cookie(), Json(response)))
}

#[instrument(skip(auth, payload))]
pub async fn solicitar_acesso(
    auth: Autenticado,
    Json(payload): Json<SolicitarAcessoRequest>,
) -> impl IntoResponse {
    let Autenticado { quem: _, mut ctx } = auth;
    // The request itself is only acknowledged; follow-up happens offline.
    ctx.session.push_flash(
        Severity::Info,
        format!(
            "Solicitação de acesso {} enviada. Entraremos em contato em breve.",
            payload.tipo_acesso
        ),
    );
    let response = NoticeResponse {
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    (ctx.cookie(), Json(response))
}

#[instrument(skip(auth))]
pub async fn salvar_preferencias(auth: Autenticado) -> impl IntoResponse {
    let Autenticado { quem: _, mut ctx } = auth;
    ctx.session
        .push_flash(Severity::Success, "Preferências salvas com sucesso!");
    let response = NoticeResponse {
        flashes: ctx.session.take_flashes(),
    };
    ctx.save();
    (ctx.cookie(), Json(response))
}
