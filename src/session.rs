use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::auth::repo::Usuario;

pub const SESSION_COOKIE: &str = "sessao_id";

/// Severity of a one-shot notice shown to the user after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// One-shot notice; consumed by the presentation layer on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub severity: Severity,
    pub text: String,
}

/// Per-browser-agent identity snapshot. The four user fields are
/// denormalized copies taken at login/registration time; their presence
/// (specifically `usuario_id`) is what "authenticated" means.
#[derive(Debug, Clone)]
pub struct Session {
    pub usuario_id: Option<Uuid>,
    pub usuario_nome: Option<String>,
    pub usuario_email: Option<String>,
    pub usuario_tipo: Option<String>,
    flashes: Vec<Flash>,
}

/// Denormalized session field overwritten after a profile update, so the
/// request does not re-read the user row it just saved.
#[derive(Debug, Clone)]
pub enum ProfileField {
    Nome(String),
    Email(String),
    Tipo(String),
}

impl Session {
    pub fn new() -> Self {
        Session {
            usuario_id: None,
            usuario_nome: None,
            usuario_email: None,
            usuario_tipo: None,
            flashes: Vec::new(),
        }
    }

    /// Writes the four identity fields from the user's current values.
    /// Called after every successful login and registration.
    pub fn establish(&mut self, usuario: &Usuario) {
        self.usuario_id = Some(usuario.id);
        self.usuario_nome = Some(usuario.nome.clone());
        self.usuario_email = Some(usuario.email.clone());
        self.usuario_tipo = Some(usuario.tipo.clone());
    }

    pub fn is_authenticated(&self) -> bool {
        self.usuario_id.is_some()
    }

    pub fn current_role(&self) -> Option<&str> {
        self.usuario_tipo.as_deref()
    }

    /// Removes the identity fields. Clearing an already-empty session is
    /// a no-op, not an error.
    pub fn clear(&mut self) {
        self.usuario_id = None;
        self.usuario_nome = None;
        self.usuario_email = None;
        self.usuario_tipo = None;
    }

    pub fn sync_field(&mut self, field: ProfileField) {
        match field {
            ProfileField::Nome(v) => self.usuario_nome = Some(v),
            ProfileField::Email(v) => self.usuario_email = Some(v),
            ProfileField::Tipo(v) => self.usuario_tipo = Some(v),
        }
    }

    pub fn push_flash(&mut self, severity: Severity, text: impl Into<String>) {
        self.flashes.push(Flash {
            severity,
            text: text.into(),
        });
    }

    /// Drains pending notices; each is shown at most once.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

struct Entry {
    session: Session,
    expires_at: OffsetDateTime,
}

/// In-memory session store keyed by the cookie-carried session id.
/// Expiry is refreshed on every save, matching the original deployment's
/// save-every-request session policy.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_seconds: i64) -> Self {
        SessionStore {
            inner: Arc::new(DashMap::new()),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Evicts every expired entry. Runs on each `create` so abandoned
    /// ids from clients that never re-present their cookie do not pile
    /// up for the full TTL and beyond.
    fn purge_expired(&self) {
        let now = OffsetDateTime::now_utc();
        self.inner.retain(|_, entry| entry.expires_at > now);
    }

    pub fn create(&self) -> Uuid {
        self.purge_expired();
        let id = Uuid::new_v4();
        self.inner.insert(
            id,
            Entry {
                session: Session::new(),
                expires_at: OffsetDateTime::now_utc() + self.ttl,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Session> {
        let expired = match self.inner.get(&id) {
            Some(entry) if entry.expires_at > OffsetDateTime::now_utc() => {
                return Some(entry.session.clone())
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.inner.remove(&id);
        }
        None
    }

    pub fn save(&self, id: Uuid, session: Session) {
        self.inner.insert(
            id,
            Entry {
                session,
                expires_at: OffsetDateTime::now_utc() + self.ttl,
            },
        );
    }

    pub fn remove(&self, id: Uuid) {
        self.inner.remove(&id);
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.whole_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn usuario_exemplo() -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            senha: "$argon2id$fake".into(),
            imagem: None,
            tipo: "usuario".into(),
            data_cadastro: datetime!(2024-01-15 10:00 UTC),
        }
    }

    #[test]
    fn establish_copies_all_four_fields() {
        let usuario = usuario_exemplo();
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.establish(&usuario);
        assert!(session.is_authenticated());
        assert_eq!(session.usuario_id, Some(usuario.id));
        assert_eq!(session.usuario_nome.as_deref(), Some("Ana"));
        assert_eq!(session.usuario_email.as_deref(), Some("ana@x.com"));
        assert_eq!(session.current_role(), Some("usuario"));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut session = Session::new();
        session.establish(&usuario_exemplo());

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_role(), None);

        // Second clear on an empty session is a no-op.
        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn sync_field_overwrites_single_copy() {
        let mut session = Session::new();
        session.establish(&usuario_exemplo());

        session.sync_field(ProfileField::Nome("Ana Maria".into()));
        session.sync_field(ProfileField::Tipo("editor".into()));

        assert_eq!(session.usuario_nome.as_deref(), Some("Ana Maria"));
        assert_eq!(session.current_role(), Some("editor"));
        // Untouched fields keep their values.
        assert_eq!(session.usuario_email.as_deref(), Some("ana@x.com"));
    }

    #[test]
    fn flashes_are_one_shot() {
        let mut session = Session::new();
        session.push_flash(Severity::Success, "Bem-vindo(a), Ana!");
        session.push_flash(Severity::Info, "ok");

        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].severity, Severity::Success);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn store_roundtrip_and_remove() {
        let store = SessionStore::new(3600);
        let id = store.create();
        assert!(store.get(id).is_some());

        let mut session = store.get(id).unwrap();
        session.establish(&usuario_exemplo());
        store.save(id, session);
        assert!(store.get(id).unwrap().is_authenticated());

        store.remove(id);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn expired_sessions_are_dropped() {
        let store = SessionStore::new(-1);
        let id = store.create();
        assert!(store.get(id).is_none());
    }

    #[test]
    fn expired_entries_are_evicted_without_lookup() {
        let store = SessionStore::new(-1);
        let abandoned = store.create();
        assert_eq!(store.inner.len(), 1);

        // A later cookie-less request triggers the sweep; the abandoned
        // id is gone even though nobody ever asked for it by id.
        let _ = store.create();
        assert_eq!(store.inner.len(), 1);
        assert!(store.get(abandoned).is_none());
    }

    #[test]
    fn live_entries_survive_the_sweep() {
        let store = SessionStore::new(3600);
        let first = store.create();
        let second = store.create();
        assert_eq!(store.inner.len(), 2);
        assert!(store.get(first).is_some());
        assert!(store.get(second).is_some());
    }
}
