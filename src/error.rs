use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Domain error returned by every core operation. The handlers map each
/// variant to a status and a user-visible notice; internal errors are
/// logged and rendered as a generic message, never interpolated raw.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),
    #[error("Já existe um usuário cadastrado com este email.")]
    DuplicateEmail,
    #[error("Credenciais inválidas.")]
    IncorrectCredential,
    #[error("Senha atual incorreta.")]
    IncorrectCurrent,
    #[error("As senhas não coincidem.")]
    MismatchConfirmation,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MismatchConfirmation => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::IncorrectCredential | AppError::IncorrectCurrent => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mensagem = match &self {
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "Erro interno. Tente novamente mais tarde.".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "erro": mensagem }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            AppError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("jogo").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::IncorrectCredential.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MismatchConfirmation.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_render_generic_notice() {
        let err = AppError::Internal(anyhow::anyhow!("pool exhausted at 10.0.0.3"));
        // The raw text stays in the logs, not in the user-facing notice.
        assert!(!format!("{}", AppError::NotFound("usuário")).contains("10.0.0.3"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
