use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::games::repo::{CategoriaFaq, FaqJogo};
use crate::questions::repo::{PerguntaUsuario, StatusPergunta};

/// A question can become a FAQ from any state except `publicada`, and
/// only once an answer has been drafted.
pub fn pode_publicar(status: StatusPergunta, resposta_admin: Option<&str>) -> bool {
    status != StatusPergunta::Publicada
        && resposta_admin.map(|r| !r.trim().is_empty()).unwrap_or(false)
}

/// Published FAQs append to the end of the game's display order. The
/// `ordem` column is an i32; counts past its range saturate at the top.
pub fn proxima_ordem(faqs_existentes: i64) -> i32 {
    i32::try_from(faqs_existentes)
        .unwrap_or(i32::MAX)
        .saturating_add(1)
}

/// Outcome of a batch publication: which rows were promoted and which
/// were skipped for failing the precondition.
#[derive(Debug, Default)]
pub struct RelatorioPublicacao {
    pub publicadas: Vec<Uuid>,
    pub ignoradas: Vec<Uuid>,
}

pub async fn enviar(
    db: &PgPool,
    jogo_id: Uuid,
    pergunta: &str,
    email: &str,
    usuario_id: Option<Uuid>,
) -> Result<PerguntaUsuario, AppError> {
    let pergunta = pergunta.trim();
    let email = email.trim();
    if pergunta.is_empty() {
        return Err(AppError::Validation(
            "Por favor, digite sua pergunta.".into(),
        ));
    }
    if email.is_empty() {
        return Err(AppError::Validation(
            "Por favor, forneça seu email para resposta.".into(),
        ));
    }

    let criada = PerguntaUsuario::create(db, jogo_id, usuario_id, pergunta, email).await?;
    info!(pergunta_id = %criada.id, anonima = usuario_id.is_none(), "question submitted");
    Ok(criada)
}

pub async fn responder(
    db: &PgPool,
    id: Uuid,
    resposta: &str,
    admin_id: Uuid,
) -> Result<PerguntaUsuario, AppError> {
    if resposta.trim().is_empty() {
        return Err(AppError::Validation(
            "Por favor, escreva uma resposta.".into(),
        ));
    }
    let pergunta = PerguntaUsuario::responder(db, id, resposta.trim(), admin_id)
        .await?
        .ok_or(AppError::NotFound("pergunta"))?;
    info!(pergunta_id = %id, admin_id = %admin_id, "question answered");
    Ok(pergunta)
}

pub async fn marcar_pendente(db: &PgPool, id: Uuid) -> Result<PerguntaUsuario, AppError> {
    let pergunta = PerguntaUsuario::set_status_reset(db, id, StatusPergunta::Pendente)
        .await?
        .ok_or(AppError::NotFound("pergunta"))?;
    Ok(pergunta)
}

pub async fn arquivar(db: &PgPool, id: Uuid) -> Result<PerguntaUsuario, AppError> {
    let pergunta = PerguntaUsuario::set_status_reset(db, id, StatusPergunta::Arquivada)
        .await?
        .ok_or(AppError::NotFound("pergunta"))?;
    Ok(pergunta)
}

/// Promotes one question to a published FAQ. The new entry lands in the
/// `geral` category at the end of the game's FAQ ordering, and the
/// question is linked to it and marked `publicada`.
pub async fn publicar(db: &PgPool, id: Uuid) -> Result<FaqJogo, AppError> {
    let pergunta = PerguntaUsuario::find_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound("pergunta"))?;

    if !pode_publicar(pergunta.status, pergunta.resposta_admin.as_deref()) {
        return Err(AppError::Validation(
            "A pergunta precisa de uma resposta e não pode já estar publicada.".into(),
        ));
    }
    // The precondition guarantees a non-empty answer.
    let resposta = pergunta.resposta_admin.as_deref().unwrap_or_default();

    let existentes = FaqJogo::count_by_jogo(db, pergunta.jogo_id).await?;
    let faq = FaqJogo::create(
        db,
        pergunta.jogo_id,
        &pergunta.pergunta,
        resposta,
        CategoriaFaq::Geral,
        proxima_ordem(existentes),
    )
    .await?;
    PerguntaUsuario::marcar_publicada(db, pergunta.id, faq.id).await?;

    info!(pergunta_id = %id, faq_id = %faq.id, ordem = faq.ordem, "question published as FAQ");
    Ok(faq)
}

/// Batch publication. Each row's precondition is re-checked
/// independently; ineligible or missing rows are reported as skipped
/// rather than failing the batch.
pub async fn publicar_lote(db: &PgPool, ids: &[Uuid]) -> Result<RelatorioPublicacao, AppError> {
    let mut relatorio = RelatorioPublicacao::default();
    for &id in ids {
        match publicar(db, id).await {
            Ok(_) => relatorio.publicadas.push(id),
            Err(AppError::Validation(_)) | Err(AppError::NotFound(_)) => {
                warn!(pergunta_id = %id, "skipped in batch publication");
                relatorio.ignoradas.push(id);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(relatorio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_requires_a_drafted_answer() {
        assert!(!pode_publicar(StatusPergunta::Pendente, None));
        assert!(!pode_publicar(StatusPergunta::Pendente, Some("")));
        assert!(!pode_publicar(StatusPergunta::Pendente, Some("   ")));
        assert!(pode_publicar(StatusPergunta::Pendente, Some("Sim, é gratuito.")));
    }

    #[test]
    fn publication_is_terminal() {
        assert!(!pode_publicar(
            StatusPergunta::Publicada,
            Some("Sim, é gratuito.")
        ));
    }

    #[test]
    fn any_answered_state_can_publish() {
        assert!(pode_publicar(StatusPergunta::Respondida, Some("ok")));
        // An archived question keeps its drafted answer and stays
        // promotable.
        assert!(pode_publicar(StatusPergunta::Arquivada, Some("ok")));
    }

    #[test]
    fn ordering_appends_after_existing_faqs() {
        assert_eq!(proxima_ordem(0), 1);
        assert_eq!(proxima_ordem(7), 8);
    }

    #[test]
    fn ordering_saturates_at_column_range() {
        assert_eq!(proxima_ordem(i64::from(i32::MAX)), i32::MAX);
        assert_eq!(proxima_ordem(i64::MAX), i32::MAX);
    }
}
