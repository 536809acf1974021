use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::auth::gate::{self, Identidade};
use crate::session::{Session, SessionStore, SESSION_COOKIE};
use crate::state::AppState;

/// The request's session, loaded from the cookie-carried id or freshly
/// created. Handlers mutate `session` and call `save` before responding.
pub struct SessionCtx {
    pub id: Uuid,
    pub session: Session,
    store: SessionStore,
}

impl SessionCtx {
    pub fn save(&self) {
        self.store.save(self.id, self.session.clone());
    }

    /// `Set-Cookie` pair refreshing the session cookie, sent with every
    /// response that touched the session.
    pub fn cookie(&self) -> AppendHeaders<[(header::HeaderName, String); 1]> {
        AppendHeaders([(
            header::SET_COOKIE,
            format!(
                "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
                SESSION_COOKIE,
                self.id,
                self.store.ttl_seconds()
            ),
        )])
    }
}

fn session_id_from_cookies(parts: &Parts) -> Option<Uuid> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

#[async_trait]
impl FromRequestParts<AppState> for SessionCtx {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let store = state.sessions.clone();
        let (id, session) = match session_id_from_cookies(parts).and_then(|id| {
            store.get(id).map(|session| (id, session))
        }) {
            Some(found) => found,
            None => {
                let id = store.create();
                (id, Session::new())
            }
        };
        Ok(SessionCtx { id, session, store })
    }
}

/// Access-gated variant: resolves the session and requires an
/// authenticated identity. Denial becomes a redirect to the login page
/// with the notice flashed into the (anonymous) session.
pub struct Autenticado {
    pub quem: Identidade,
    pub ctx: SessionCtx,
}

#[async_trait]
impl FromRequestParts<AppState> for Autenticado {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Response> {
        let mut ctx = match SessionCtx::from_request_parts(parts, state).await {
            Ok(ctx) => ctx,
            Err(infallible) => match infallible {},
        };
        match gate::require_authenticated(&ctx.session) {
            Ok(quem) => Ok(Autenticado { quem, ctx }),
            Err(deny) => {
                ctx.session.push_flash(deny.severity, deny.text);
                ctx.save();
                Err((ctx.cookie(), Redirect::to(deny.redirect_to)).into_response())
            }
        }
    }
}
