use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_pergunta", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusPergunta {
    Pendente,
    Respondida,
    Arquivada,
    Publicada,
}

impl StatusPergunta {
    pub fn display(&self) -> &'static str {
        match self {
            StatusPergunta::Pendente => "Pendente",
            StatusPergunta::Respondida => "Respondida",
            StatusPergunta::Arquivada => "Arquivada",
            StatusPergunta::Publicada => "Publicada como FAQ",
        }
    }
}

/// Question submitted against a game, by a logged-in user or an anonymous
/// visitor identified only by contact email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerguntaUsuario {
    pub id: Uuid,
    pub usuario_id: Option<Uuid>,
    pub jogo_id: Uuid,
    pub pergunta: String,
    pub email: String,
    pub status: StatusPergunta,
    pub resposta_admin: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub data_envio: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub data_resposta: Option<OffsetDateTime>,
    pub admin_respondeu: Option<Uuid>,
    pub publicado_como_faq: Option<Uuid>,
}

const PERGUNTA_COLUMNS: &str = "id, usuario_id, jogo_id, pergunta, email, status, \
                                resposta_admin, data_envio, data_resposta, admin_respondeu, \
                                publicado_como_faq";

impl PerguntaUsuario {
    pub async fn create(
        db: &PgPool,
        jogo_id: Uuid,
        usuario_id: Option<Uuid>,
        pergunta: &str,
        email: &str,
    ) -> anyhow::Result<PerguntaUsuario> {
        let row = sqlx::query_as::<_, PerguntaUsuario>(&format!(
            r#"
            INSERT INTO perguntas_usuario (jogo_id, usuario_id, pergunta, email, status)
            VALUES ($1, $2, $3, $4, 'pendente')
            RETURNING {PERGUNTA_COLUMNS}
            "#
        ))
        .bind(jogo_id)
        .bind(usuario_id)
        .bind(pergunta)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<PerguntaUsuario>> {
        let row = sqlx::query_as::<_, PerguntaUsuario>(&format!(
            "SELECT {PERGUNTA_COLUMNS} FROM perguntas_usuario WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Newest first, matching the admin listing order.
    pub async fn list(
        db: &PgPool,
        status: Option<StatusPergunta>,
    ) -> anyhow::Result<Vec<PerguntaUsuario>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, PerguntaUsuario>(&format!(
                    r#"
                    SELECT {PERGUNTA_COLUMNS}
                    FROM perguntas_usuario
                    WHERE status = $1
                    ORDER BY data_envio DESC
                    "#
                ))
                .bind(status)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, PerguntaUsuario>(&format!(
                    r#"
                    SELECT {PERGUNTA_COLUMNS}
                    FROM perguntas_usuario
                    ORDER BY data_envio DESC, status
                    "#
                ))
                .fetch_all(db)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn responder(
        db: &PgPool,
        id: Uuid,
        resposta: &str,
        admin_id: Uuid,
    ) -> anyhow::Result<Option<PerguntaUsuario>> {
        let row = sqlx::query_as::<_, PerguntaUsuario>(&format!(
            r#"
            UPDATE perguntas_usuario
            SET status = 'respondida', resposta_admin = $2, data_resposta = now(),
                admin_respondeu = $3
            WHERE id = $1
            RETURNING {PERGUNTA_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(resposta)
        .bind(admin_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Reset path. Clears the answer timestamp but keeps any drafted
    /// answer text for later reuse.
    pub async fn set_status_reset(
        db: &PgPool,
        id: Uuid,
        status: StatusPergunta,
    ) -> anyhow::Result<Option<PerguntaUsuario>> {
        let row = sqlx::query_as::<_, PerguntaUsuario>(&format!(
            r#"
            UPDATE perguntas_usuario
            SET status = $2, data_resposta = NULL
            WHERE id = $1
            RETURNING {PERGUNTA_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn marcar_publicada(db: &PgPool, id: Uuid, faq_id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE perguntas_usuario
            SET status = 'publicada', publicado_como_faq = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(faq_id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn count_by_status(db: &PgPool, status: StatusPergunta) -> anyhow::Result<i64> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM perguntas_usuario WHERE status = $1")
                .bind(status)
                .fetch_one(db)
                .await?;
        Ok(total)
    }
}
