use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Default role given to newly registered users. Other roles (`editor`,
/// `admin`, `especialista`) exist only as column values.
pub const TIPO_USUARIO: &str = "usuario";

/// User record in the database. `senha` holds either an argon2 hash or a
/// legacy plaintext value, distinguished by the hash prefix.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha: String,
    pub imagem: Option<String>,
    pub tipo: String,
    pub data_cadastro: OffsetDateTime,
}

impl Usuario {
    /// Avatar URL, falling back to a generated initials image.
    pub fn avatar_url(&self) -> String {
        match &self.imagem {
            Some(imagem) => imagem.clone(),
            None => format!(
                "https://ui-avatars.com/api/?name={}&background=random&color=fff&size=100",
                self.nome
            ),
        }
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, nome, email, senha, imagem, tipo, data_cadastro
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(usuario)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, nome, email, senha, imagem, tipo, data_cadastro
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(usuario)
    }

    /// Create a new user. `senha` must already be hashed by the caller.
    pub async fn create(
        db: &PgPool,
        nome: &str,
        email: &str,
        senha: &str,
        imagem: Option<&str>,
    ) -> anyhow::Result<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nome, email, senha, imagem, tipo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, email, senha, imagem, tipo, data_cadastro
            "#,
        )
        .bind(nome)
        .bind(email)
        .bind(senha)
        .bind(imagem)
        .bind(TIPO_USUARIO)
        .fetch_one(db)
        .await?;
        Ok(usuario)
    }

    /// Single-row secret rewrite, used by both lazy migration and
    /// explicit password change.
    pub async fn update_senha(db: &PgPool, id: Uuid, senha: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE usuarios SET senha = $2 WHERE id = $1")
            .bind(id)
            .bind(senha)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        nome: &str,
        email: &str,
        tipo: &str,
    ) -> anyhow::Result<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET nome = $2, email = $3, tipo = $4
            WHERE id = $1
            RETURNING id, nome, email, senha, imagem, tipo, data_cadastro
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(email)
        .bind(tipo)
        .fetch_one(db)
        .await?;
        Ok(usuario)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
            .fetch_one(db)
            .await?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn usuario(tipo: &str, imagem: Option<&str>) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            senha: "$argon2id$fake".into(),
            imagem: imagem.map(str::to_string),
            tipo: tipo.into(),
            data_cadastro: datetime!(2024-01-15 10:00 UTC),
        }
    }

    #[test]
    fn avatar_falls_back_to_generated_image() {
        let com_imagem = usuario(TIPO_USUARIO, Some("https://cdn.x/ana.png"));
        assert_eq!(com_imagem.avatar_url(), "https://cdn.x/ana.png");

        let sem_imagem = usuario(TIPO_USUARIO, None);
        assert!(sem_imagem.avatar_url().contains("ui-avatars.com"));
        assert!(sem_imagem.avatar_url().contains("name=Ana"));
    }
}
