use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Catalog item. The site is built around a single active game, but the
/// schema allows several; `find_ativo` picks the first active one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Jogo {
    pub id: Uuid,
    pub titulo: String,
    pub subtitulo: Option<String>,
    pub descricao: Option<String>,
    pub descricao_detalhada: Option<String>,
    pub desenvolvedor: String,
    pub plataformas: String,
    pub idade_recomendada: String,
    pub tamanho: String,
    pub versao: String,
    pub download_windows: Option<String>,
    pub download_android: Option<String>,
    pub download_ios: Option<String>,
    pub imagem_capa: Option<String>,
    pub data_lancamento: Option<Date>,
    pub ativo: bool,
    pub jogadores_ativos: i32,
    pub avaliacao_media: f64,
    pub tempo_jogo_medio: String,
    pub aprendizado_efetivo: String,
}

impl Jogo {
    pub fn plataformas_lista(&self) -> Vec<String> {
        self.plataformas
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn imagem_capa_url(&self) -> String {
        match &self.imagem_capa {
            Some(url) => url.clone(),
            None => {
                "https://images.unsplash.com/photo-1593113630400-ea4288922497?q=80&w=1000".into()
            }
        }
    }

    pub async fn find_ativo(db: &PgPool) -> anyhow::Result<Option<Jogo>> {
        let jogo = sqlx::query_as::<_, Jogo>(
            r#"
            SELECT id, titulo, subtitulo, descricao, descricao_detalhada, desenvolvedor,
                   plataformas, idade_recomendada, tamanho, versao, download_windows,
                   download_android, download_ios, imagem_capa, data_lancamento, ativo,
                   jogadores_ativos, avaliacao_media, tempo_jogo_medio, aprendizado_efetivo
            FROM jogos
            WHERE ativo = TRUE
            ORDER BY data_lancamento
            LIMIT 1
            "#,
        )
        .fetch_optional(db)
        .await?;
        Ok(jogo)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaracteristicaJogo {
    pub id: Uuid,
    pub jogo_id: Uuid,
    pub icone: String,
    pub descricao: String,
    pub ordem: i32,
}

impl CaracteristicaJogo {
    pub async fn list_by_jogo(db: &PgPool, jogo_id: Uuid) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, jogo_id, icone, descricao, ordem
            FROM caracteristicas_jogo
            WHERE jogo_id = $1
            ORDER BY ordem
            "#,
        )
        .bind(jogo_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tipo_requisito", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoRequisito {
    Minimo,
    Recomendado,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequisitoJogo {
    pub id: Uuid,
    pub jogo_id: Uuid,
    pub tipo: TipoRequisito,
    pub descricao: String,
}

impl RequisitoJogo {
    pub async fn list_by_tipo(
        db: &PgPool,
        jogo_id: Uuid,
        tipo: TipoRequisito,
    ) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, jogo_id, tipo, descricao
            FROM requisitos_jogo
            WHERE jogo_id = $1 AND tipo = $2
            "#,
        )
        .bind(jogo_id)
        .bind(tipo)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AtualizacaoJogo {
    pub id: Uuid,
    pub jogo_id: Uuid,
    pub versao: String,
    pub data: Date,
    pub descricao: String,
    pub detalhes: Option<String>,
    pub ordem: i32,
}

impl AtualizacaoJogo {
    pub async fn recentes(db: &PgPool, jogo_id: Uuid, limit: i64) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, jogo_id, versao, data, descricao, detalhes, ordem
            FROM atualizacoes_jogo
            WHERE jogo_id = $1
            ORDER BY data DESC, ordem DESC
            LIMIT $2
            "#,
        )
        .bind(jogo_id)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "categoria_faq", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoriaFaq {
    Geral,
    Tecnico,
    Jogabilidade,
    Pedagogico,
    Outros,
}

impl CategoriaFaq {
    /// Display label, as shown on the site and used for grouping.
    pub fn display(&self) -> &'static str {
        match self {
            CategoriaFaq::Geral => "Geral",
            CategoriaFaq::Tecnico => "Técnico",
            CategoriaFaq::Jogabilidade => "Jogabilidade",
            CategoriaFaq::Pedagogico => "Pedagógico",
            CategoriaFaq::Outros => "Outros",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FaqJogo {
    pub id: Uuid,
    pub jogo_id: Uuid,
    pub pergunta: String,
    pub resposta: String,
    pub ordem: i32,
    pub ativo: bool,
    pub visivel: bool,
    pub categoria: CategoriaFaq,
    #[serde(with = "time::serde::rfc3339")]
    pub data_criacao: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub data_atualizacao: OffsetDateTime,
}

const FAQ_COLUMNS: &str = "id, jogo_id, pergunta, resposta, ordem, ativo, visivel, categoria, \
                           data_criacao, data_atualizacao";

impl FaqJogo {
    /// FAQs shown on the game page: active and visible, in display order.
    pub async fn visiveis(db: &PgPool, jogo_id: Uuid) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(&format!(
            r#"
            SELECT {FAQ_COLUMNS}
            FROM faqs_jogo
            WHERE jogo_id = $1 AND ativo = TRUE AND visivel = TRUE
            ORDER BY ordem, categoria
            "#
        ))
        .bind(jogo_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_by_jogo(db: &PgPool, jogo_id: Uuid) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM faqs_jogo WHERE jogo_id = $1")
            .bind(jogo_id)
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM faqs_jogo")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn create(
        db: &PgPool,
        jogo_id: Uuid,
        pergunta: &str,
        resposta: &str,
        categoria: CategoriaFaq,
        ordem: i32,
    ) -> anyhow::Result<FaqJogo> {
        let faq = sqlx::query_as::<_, FaqJogo>(&format!(
            r#"
            INSERT INTO faqs_jogo (jogo_id, pergunta, resposta, categoria, ordem, visivel, ativo)
            VALUES ($1, $2, $3, $4, $5, TRUE, TRUE)
            RETURNING {FAQ_COLUMNS}
            "#
        ))
        .bind(jogo_id)
        .bind(pergunta)
        .bind(resposta)
        .bind(categoria)
        .bind(ordem)
        .fetch_one(db)
        .await?;
        Ok(faq)
    }

    pub async fn set_visivel(db: &PgPool, id: Uuid, visivel: bool) -> anyhow::Result<u64> {
        let result = sqlx::query(
            "UPDATE faqs_jogo SET visivel = $2, data_atualizacao = now() WHERE id = $1",
        )
        .bind(id)
        .bind(visivel)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn set_ativo(db: &PgPool, id: Uuid, ativo: bool) -> anyhow::Result<u64> {
        let result =
            sqlx::query("UPDATE faqs_jogo SET ativo = $2, data_atualizacao = now() WHERE id = $1")
                .bind(id)
                .bind(ativo)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImagemJogo {
    pub id: Uuid,
    pub jogo_id: Uuid,
    pub url: String,
    pub legenda: Option<String>,
    pub ordem: i32,
}

impl ImagemJogo {
    pub async fn list_by_jogo(db: &PgPool, jogo_id: Uuid, limit: i64) -> anyhow::Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, jogo_id, url, legenda, ordem
            FROM imagens_jogo
            WHERE jogo_id = $1
            ORDER BY ordem
            LIMIT $2
            "#,
        )
        .bind(jogo_id)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

/// Review joined with its author, for the expert-review block.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvaliacaoEspecialista {
    pub id: Uuid,
    pub texto: Option<String>,
    pub nota: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub horario: OffsetDateTime,
    pub usuario_nome: String,
    pub usuario_tipo: String,
    pub usuario_imagem: Option<String>,
}

pub struct Avaliacao;

impl Avaliacao {
    /// Average rating and total count for one game.
    pub async fn resumo(db: &PgPool, jogo_id: Uuid) -> anyhow::Result<(Option<f64>, i64)> {
        let row: (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(nota)::float8, COUNT(*) FROM avaliacoes WHERE jogo_id = $1",
        )
        .bind(jogo_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Highest-rated reviews written by staff or experts.
    pub async fn especialistas(
        db: &PgPool,
        jogo_id: Uuid,
        limit: i64,
    ) -> anyhow::Result<Vec<AvaliacaoEspecialista>> {
        let rows = sqlx::query_as::<_, AvaliacaoEspecialista>(
            r#"
            SELECT a.id, a.texto, a.nota, a.horario,
                   u.nome AS usuario_nome, u.tipo AS usuario_tipo, u.imagem AS usuario_imagem
            FROM avaliacoes a
            JOIN usuarios u ON u.id = a.usuario_id
            WHERE a.jogo_id = $1 AND u.tipo IN ('especialista', 'admin', 'editor')
            ORDER BY a.nota DESC
            LIMIT $2
            "#,
        )
        .bind(jogo_id)
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jogo(plataformas: &str, imagem: Option<&str>) -> Jogo {
        Jogo {
            id: Uuid::new_v4(),
            titulo: "A Crise G".into(),
            subtitulo: None,
            descricao: None,
            descricao_detalhada: None,
            desenvolvedor: "A Crise G Studios".into(),
            plataformas: plataformas.into(),
            idade_recomendada: "12+ anos".into(),
            tamanho: "850MB (PC) / 320MB (Mobile)".into(),
            versao: "1.3.2".into(),
            download_windows: None,
            download_android: None,
            download_ios: None,
            imagem_capa: imagem.map(str::to_string),
            data_lancamento: None,
            ativo: true,
            jogadores_ativos: 50_000,
            avaliacao_media: 4.8,
            tempo_jogo_medio: "12h".into(),
            aprendizado_efetivo: "95%".into(),
        }
    }

    #[test]
    fn plataformas_lista_trims_and_splits() {
        let jogo = jogo("Windows, Android , iOS", None);
        assert_eq!(jogo.plataformas_lista(), vec!["Windows", "Android", "iOS"]);
    }

    #[test]
    fn imagem_capa_falls_back_to_default() {
        assert!(jogo("Windows", None)
            .imagem_capa_url()
            .contains("unsplash.com"));
        assert_eq!(
            jogo("Windows", Some("https://cdn.x/capa.png")).imagem_capa_url(),
            "https://cdn.x/capa.png"
        );
    }

    #[test]
    fn categoria_display_labels() {
        assert_eq!(CategoriaFaq::Geral.display(), "Geral");
        assert_eq!(CategoriaFaq::Tecnico.display(), "Técnico");
        assert_eq!(CategoriaFaq::Pedagogico.display(), "Pedagógico");
    }
}
