use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artigo {
    pub id: Uuid,
    pub titulo: String,
    pub resumo: Option<String>,
    pub data_publicacao: Option<Date>,
    pub usuario_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicoArtigo {
    pub id: Uuid,
    pub artigo_id: Uuid,
    pub titulo: String,
    pub texto: Option<String>,
}

impl Artigo {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Artigo>> {
        let rows = sqlx::query_as::<_, Artigo>(
            r#"
            SELECT id, titulo, resumo, data_publicacao, usuario_id
            FROM artigos
            ORDER BY data_publicacao DESC NULLS LAST, titulo
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Artigo>> {
        let row = sqlx::query_as::<_, Artigo>(
            "SELECT id, titulo, resumo, data_publicacao, usuario_id FROM artigos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn topicos(db: &PgPool, artigo_id: Uuid) -> anyhow::Result<Vec<TopicoArtigo>> {
        let rows = sqlx::query_as::<_, TopicoArtigo>(
            "SELECT id, artigo_id, titulo, texto FROM topicos_artigo WHERE artigo_id = $1",
        )
        .bind(artigo_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Desastre {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub icone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicoDesastre {
    pub id: Uuid,
    pub desastre_id: Uuid,
    pub titulo: String,
    pub texto: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Risco {
    pub id: Uuid,
    pub desastre_id: Uuid,
    pub nome: String,
    pub nivel: Option<String>,
    pub descricao: Option<String>,
    pub localizacao: Option<String>,
}

impl Desastre {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Desastre>> {
        let rows = sqlx::query_as::<_, Desastre>(
            "SELECT id, titulo, descricao, icone FROM desastres ORDER BY titulo",
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Desastre>> {
        let row = sqlx::query_as::<_, Desastre>(
            "SELECT id, titulo, descricao, icone FROM desastres WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn topicos(db: &PgPool, desastre_id: Uuid) -> anyhow::Result<Vec<TopicoDesastre>> {
        let rows = sqlx::query_as::<_, TopicoDesastre>(
            "SELECT id, desastre_id, titulo, texto FROM topicos_desastre WHERE desastre_id = $1",
        )
        .bind(desastre_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn riscos(db: &PgPool, desastre_id: Uuid) -> anyhow::Result<Vec<Risco>> {
        let rows = sqlx::query_as::<_, Risco>(
            r#"
            SELECT id, desastre_id, nome, nivel, descricao, localizacao
            FROM riscos
            WHERE desastre_id = $1
            ORDER BY nome
            "#,
        )
        .bind(desastre_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Acontecimento {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_acontecimento: Option<Date>,
    pub risco: Option<String>,
}

impl Acontecimento {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Acontecimento>> {
        let rows = sqlx::query_as::<_, Acontecimento>(
            r#"
            SELECT id, titulo, descricao, data_acontecimento, risco
            FROM acontecimentos
            ORDER BY data_acontecimento DESC NULLS LAST
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
