use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_stored};
use crate::auth::repo::{Usuario, TIPO_USUARIO};
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Field validation for registration, separate from the duplicate-email
/// check which needs the database.
pub fn validar_registro(
    nome: &str,
    email: &str,
    senha: &str,
    confirmar_senha: &str,
) -> Result<(), AppError> {
    if nome.trim().is_empty() {
        return Err(AppError::Validation("Por favor, informe seu nome.".into()));
    }
    if !is_valid_email(email) {
        return Err(AppError::Validation("Email inválido.".into()));
    }
    if senha.is_empty() {
        return Err(AppError::Validation("Por favor, informe uma senha.".into()));
    }
    if senha.chars().count() < 6 {
        return Err(AppError::Validation(
            "A senha deve ter pelo menos 6 caracteres.".into(),
        ));
    }
    if senha != confirmar_senha {
        return Err(AppError::MismatchConfirmation);
    }
    Ok(())
}

/// Validates a password change against the stored secret and, when every
/// check passes, returns the hash to persist. The current-password check
/// goes through the same hash-aware verification as login, so it works
/// for both hashed and legacy-format secrets.
pub fn validar_troca_senha(
    stored: &str,
    senha_atual: &str,
    nova_senha: &str,
    confirmar_senha: &str,
) -> Result<String, AppError> {
    if nova_senha != confirmar_senha {
        return Err(AppError::MismatchConfirmation);
    }
    if nova_senha.is_empty() {
        return Err(AppError::Validation(
            "Por favor, informe a nova senha.".into(),
        ));
    }
    let outcome = verify_stored(stored, senha_atual)?;
    if !outcome.matched {
        return Err(AppError::IncorrectCurrent);
    }
    Ok(hash_password(nova_senha)?)
}

/// Authenticates by email and raw secret. A matching legacy plaintext
/// secret is rewritten as a hash and persisted before success is
/// reported; mismatches never mutate the stored value.
pub async fn login(db: &PgPool, email: &str, senha: &str) -> Result<Usuario, AppError> {
    let email = normalizar_email(email);
    let mut usuario = match Usuario::find_by_email(db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::IncorrectCredential);
        }
    };

    let outcome = verify_stored(&usuario.senha, senha)?;
    if !outcome.matched {
        warn!(usuario_id = %usuario.id, "login invalid password");
        return Err(AppError::IncorrectCredential);
    }
    if let Some(novo) = outcome.rehashed {
        Usuario::update_senha(db, usuario.id, &novo).await?;
        usuario.senha = novo;
        info!(usuario_id = %usuario.id, "legacy secret migrated to hash");
    }

    info!(usuario_id = %usuario.id, "user logged in");
    Ok(usuario)
}

/// Creates a user with a hashed secret and the default role.
pub async fn registrar(
    db: &PgPool,
    nome: &str,
    email: &str,
    senha: &str,
    confirmar_senha: &str,
    imagem: Option<&str>,
) -> Result<Usuario, AppError> {
    let email = normalizar_email(email);
    validar_registro(nome, &email, senha, confirmar_senha)?;

    if Usuario::find_by_email(db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(senha)?;
    let usuario = Usuario::create(db, nome.trim(), &email, &hash, imagem).await?;
    debug_assert_eq!(usuario.tipo, TIPO_USUARIO);

    info!(usuario_id = %usuario.id, email = %usuario.email, "user registered");
    Ok(usuario)
}

pub async fn trocar_senha(
    db: &PgPool,
    usuario: &Usuario,
    senha_atual: &str,
    nova_senha: &str,
    confirmar_senha: &str,
) -> Result<(), AppError> {
    let hash = validar_troca_senha(&usuario.senha, senha_atual, nova_senha, confirmar_senha)?;
    Usuario::update_senha(db, usuario.id, &hash).await?;
    info!(usuario_id = %usuario.id, "password changed");
    Ok(())
}

pub async fn atualizar_perfil(
    db: &PgPool,
    usuario: &Usuario,
    nome: &str,
    email: &str,
    tipo: Option<&str>,
) -> Result<Usuario, AppError> {
    let email = normalizar_email(email);
    if nome.trim().is_empty() {
        return Err(AppError::Validation("Por favor, informe seu nome.".into()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Email inválido.".into()));
    }
    if email != usuario.email {
        if let Some(existente) = Usuario::find_by_email(db, &email).await? {
            if existente.id != usuario.id {
                return Err(AppError::DuplicateEmail);
            }
        }
    }

    let tipo = tipo.unwrap_or(TIPO_USUARIO);
    let atualizado = Usuario::update_profile(db, usuario.id, nome.trim(), &email, tipo).await?;
    info!(usuario_id = %usuario.id, "profile updated");
    Ok(atualizado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::{is_hashed, verify_password};

    #[test]
    fn email_validation() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("a.b@dominio.com.br"));
        assert!(!is_valid_email("sem-arroba"));
        assert!(!is_valid_email("espaco @x.com"));
        assert!(!is_valid_email("ana@semponto"));
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalizar_email("  Ana@X.Com "), "ana@x.com");
    }

    #[test]
    fn registration_rejects_bad_fields() {
        assert!(matches!(
            validar_registro("", "ana@x.com", "abc123", "abc123"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validar_registro("Ana", "nope", "abc123", "abc123"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validar_registro("Ana", "ana@x.com", "", ""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validar_registro("Ana", "ana@x.com", "abc123", "abc124"),
            Err(AppError::MismatchConfirmation)
        ));
        assert!(validar_registro("Ana", "ana@x.com", "abc123", "abc123").is_ok());
    }

    #[test]
    fn registration_requires_minimum_password_length() {
        let err = validar_registro("Ana", "ana@x.com", "abc", "abc").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("6 caracteres"));

        // Exactly six characters is the shortest accepted secret.
        assert!(validar_registro("Ana", "ana@x.com", "abc123", "abc123").is_ok());
    }

    #[test]
    fn change_rejects_mismatched_confirmation_first() {
        // Confirmation mismatch wins even when the current password is
        // also wrong.
        let err = validar_troca_senha("abc123", "errada", "nova1", "nova2").unwrap_err();
        assert!(matches!(err, AppError::MismatchConfirmation));
    }

    #[test]
    fn change_rejects_wrong_current_password() {
        let hash = hash_password("abc123").unwrap();
        let err = validar_troca_senha(&hash, "errada", "nova123", "nova123").unwrap_err();
        assert!(matches!(err, AppError::IncorrectCurrent));
    }

    #[test]
    fn change_accepts_current_password_in_either_format() {
        // Hashed secret.
        let hash = hash_password("abc123").unwrap();
        let novo = validar_troca_senha(&hash, "abc123", "nova123", "nova123").unwrap();
        assert!(is_hashed(&novo));
        assert!(verify_password("nova123", &novo).unwrap());

        // Legacy plaintext secret.
        let novo = validar_troca_senha("abc123", "abc123", "nova123", "nova123").unwrap();
        assert!(is_hashed(&novo));
        assert!(verify_password("nova123", &novo).unwrap());
    }

    #[test]
    fn new_secret_is_always_stored_hashed() {
        let hash = hash_password("abc123").unwrap();
        let novo = validar_troca_senha(&hash, "abc123", "nova123", "nova123").unwrap();
        assert_ne!(novo, "nova123");
        assert!(is_hashed(&novo));
    }
}
