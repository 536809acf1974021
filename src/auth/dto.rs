use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::Usuario;
use crate::session::{Flash, Session};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegistroRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub confirmar_senha: String,
    pub imagem: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtualizarPerfilRequest {
    pub nome: String,
    pub email: String,
    pub tipo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrocarSenhaRequest {
    pub senha_atual: String,
    pub nova_senha: String,
    pub confirmar_senha: String,
}

#[derive(Debug, Deserialize)]
pub struct SolicitarAcessoRequest {
    pub tipo_acesso: String,
    #[serde(default)]
    pub mensagem: String,
}

/// Public part of the user returned to the client; never carries the
/// stored secret.
#[derive(Debug, Serialize)]
pub struct UsuarioPublico {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub tipo: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub data_cadastro: OffsetDateTime,
}

impl From<&Usuario> for UsuarioPublico {
    fn from(usuario: &Usuario) -> Self {
        UsuarioPublico {
            id: usuario.id,
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
            tipo: usuario.tipo.clone(),
            avatar: usuario.avatar_url(),
            data_cadastro: usuario.data_cadastro,
        }
    }
}

/// Session-derived identity block handed to every page context, mirroring
/// what the template layer expects site-wide.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub is_authenticated: bool,
    pub id: Option<Uuid>,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub tipo: Option<String>,
}

impl UserInfo {
    pub fn from_session(session: &Session) -> Self {
        UserInfo {
            is_authenticated: session.is_authenticated(),
            id: session.usuario_id,
            nome: session.usuario_nome.clone(),
            email: session.usuario_email.clone(),
            tipo: session.usuario_tipo.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub user_info: UserInfo,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct LoginPageResponse {
    pub active_tab: String,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct SessaoResponse {
    pub usuario: UsuarioPublico,
}

#[derive(Debug, Serialize)]
pub struct PerfilResponse {
    pub usuario: UsuarioPublico,
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user_info: UserInfo,
    pub total_usuarios: i64,
    pub perguntas_pendentes: i64,
    pub total_faqs: i64,
    pub flashes: Vec<Flash>,
}
