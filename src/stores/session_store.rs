// ============================================================================
// SESSION STORE - Única fuente de verdad sobre quién está conectado
// ============================================================================
// Único escritor del token: memoria, cabecera Authorization del cliente y
// almacenamiento durable se actualizan juntos en `set_token`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::ApiError;
use crate::models::{Profile, RegisterRequest, Session};
use crate::services::{ApiClient, AuthApi, AuthFailure};
use crate::state::{ReactiveState, Signal, Subscription};
use crate::utils::TokenStorage;

#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    client: ApiClient,
    storage: Rc<dyn TokenStorage>,
    storage_key: String,
    state: ReactiveState<Session>,
    unauthenticated: Signal<()>,
    /// `restore()` is waiting on `/auth/me`.
    restoring: Cell<bool>,
    auth_failures: RefCell<Option<Subscription>>,
}

impl SessionStore {
    pub fn new(client: ApiClient, storage: Rc<dyn TokenStorage>, storage_key: impl Into<String>) -> Self {
        let inner = Rc::new(SessionInner {
            client,
            storage,
            storage_key: storage_key.into(),
            state: ReactiveState::new(Session::restoring()),
            unauthenticated: Signal::new(),
            restoring: Cell::new(false),
            auth_failures: RefCell::new(None),
        });

        let weak: Weak<SessionInner> = Rc::downgrade(&inner);
        let subscription = inner.client.on_auth_failure(move |failure| {
            if let Some(inner) = weak.upgrade() {
                SessionStore { inner }.handle_auth_failure(failure);
            }
        });
        *inner.auth_failures.borrow_mut() = Some(subscription);

        Self { inner }
    }

    // ------------------------------------------------------------------------
    // Escritura
    // ------------------------------------------------------------------------

    /// Sets the token everywhere it lives. `None` also drops the profile.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.trim().is_empty());
        let key = self.inner.storage_key.as_str();

        self.inner.client.set_bearer(token.as_deref());
        let persisted = match &token {
            Some(value) => self.inner.storage.store(key, value),
            None => self.inner.storage.remove(key),
        };
        if let Err(e) = persisted {
            log::warn!("⚠️ No se pudo persistir el token: {}", e);
        }

        self.inner.state.update(move |session| {
            if token.is_none() {
                session.user = None;
            }
            session.token = token;
        });
    }

    /// Returns false (and changes nothing) when a profile is set without a token.
    pub fn set_user(&self, user: Option<Profile>) -> bool {
        if user.is_some() && self.token().is_none() {
            log::warn!("⚠️ Perfil ignorado: no hay token activo");
            return false;
        }
        self.inner.state.update(move |session| session.user = user);
        true
    }

    /// Startup check of the persisted token; any failure ends unauthenticated.
    pub async fn restore(&self) {
        let stored = match self.inner.storage.load(&self.inner.storage_key) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                log::warn!("⚠️ Almacenamiento no disponible: {}", e);
                None
            }
        };

        if let Some(token) = stored {
            log::info!("🔑 Token encontrado, verificando /auth/me");
            self.set_token(Some(token));
            self.inner.restoring.set(true);
            let verified = self.auth().me().await;
            self.inner.restoring.set(false);
            match verified {
                Ok(profile) => {
                    log::info!("✅ Sesión restaurada para {}", profile.email);
                    self.set_user(Some(profile));
                }
                Err(e) => {
                    log::warn!("❌ Token persistido rechazado: {}", e);
                    self.set_token(None);
                }
            }
        } else {
            log::info!("ℹ️ Sin token persistido");
        }

        self.inner.state.update(|session| session.is_loading = false);
    }

    /// Any failure leaves the session fully cleared.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ApiError> {
        match self.try_login(email, password).await {
            Ok(profile) => {
                log::info!("✅ Login correcto: {}", profile.display_name());
                Ok(profile)
            }
            Err(e) => {
                log::warn!("❌ Login fallido: {}", e);
                self.set_token(None);
                Err(e)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<Profile, ApiError> {
        let auth = self.auth();
        let response = auth.login(email, password).await?;
        let token = response.access_token.ok_or(ApiError::MissingToken)?;
        self.set_token(Some(token));

        let profile = match response.user {
            Some(profile) => profile,
            None => auth.me().await?,
        };
        self.set_user(Some(profile.clone()));
        Ok(profile)
    }

    pub fn logout(&self) {
        log::info!("👋 Logout");
        self.set_token(None);
    }

    /// Creates an account; does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Profile, ApiError> {
        self.auth().register(request).await
    }

    // ------------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> Session {
        self.inner.state.snapshot()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.get().token.clone()
    }

    pub fn user(&self) -> Option<Profile> {
        self.inner.state.get().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.get().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.get().is_authenticated()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    /// Fired once per rejected token (401 on a request carrying the current token).
    /// Silent while `restore()` is still running.
    pub fn on_unauthenticated<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.inner.unauthenticated.subscribe(move |_| callback())
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    fn auth(&self) -> AuthApi {
        AuthApi::new(self.inner.client.clone())
    }

    fn handle_auth_failure(&self, failure: &AuthFailure) {
        let current = self.token();
        // requests sent with an older token (or none) do not end the current session
        if current.is_none() || current != failure.token {
            return;
        }
        self.set_token(None);
        if self.inner.restoring.get() {
            // restore settles this one itself, quietly
            log::info!("🔒 Token persistido rechazado durante la restauración");
            return;
        }
        log::warn!("🔒 Token rechazado por el servidor, cerrando sesión");
        self.inner.unauthenticated.emit(&());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::testing::MockTransport;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;

    const KEY: &str = "token";

    fn store_with(transport: &Rc<MockTransport>, storage: Rc<MemoryStorage>) -> SessionStore {
        let client = ApiClient::new(&ClientConfig::default(), transport.clone());
        SessionStore::new(client, storage, KEY)
    }

    #[test]
    fn set_token_mirrors_header_and_storage() {
        let transport = Rc::new(MockTransport::new());
        let storage = Rc::new(MemoryStorage::new());
        let store = store_with(&transport, storage.clone());

        store.set_token(Some("abc".into()));
        assert_eq!(store.client().bearer().as_deref(), Some("abc"));
        assert_eq!(storage.load(KEY).unwrap().as_deref(), Some("abc"));

        store.set_token(None);
        assert_eq!(store.client().bearer(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn profile_without_token_is_refused() {
        let transport = Rc::new(MockTransport::new());
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));
        assert!(!store.set_user(Some(Profile::default())));
        assert_eq!(store.user(), None);
    }

    #[test]
    fn clearing_token_clears_profile() {
        let transport = Rc::new(MockTransport::new());
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));
        store.set_token(Some("abc".into()));
        assert!(store.set_user(Some(Profile::default())));
        store.set_token(None);
        assert_eq!(store.snapshot().user, None);
    }

    #[test]
    fn restore_without_token_only_stops_loading() {
        let transport = Rc::new(MockTransport::new());
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));
        assert!(store.is_loading());

        block_on(store.restore());
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn stale_token_failure_is_ignored() {
        let transport = Rc::new(MockTransport::new());
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));
        let fired = Rc::new(Cell::new(0));
        let _sub = {
            let fired = fired.clone();
            store.on_unauthenticated(move || fired.set(fired.get() + 1))
        };

        store.set_token(Some("new".into()));
        store.handle_auth_failure(&AuthFailure { token: Some("old".into()) });
        assert_eq!(store.token().as_deref(), Some("new"));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn login_without_user_field_falls_back_to_me() {
        let transport = Rc::new(MockTransport::new());
        transport.on_json(
            crate::services::Method::Post,
            "/auth/login-json",
            200,
            json!({"access_token": "t-1", "token_type": "bearer"}),
        );
        transport.on_json(
            crate::services::Method::Get,
            "/auth/me",
            200,
            json!({"id": 3, "email": "ines@aetheris.fr", "nom": "Roux", "role": "infirmier"}),
        );
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));

        let profile = block_on(store.login("ines@aetheris.fr", "pw")).unwrap();
        assert_eq!(profile.id, 3);
        assert_eq!(store.token().as_deref(), Some("t-1"));
        let me = transport.requests_to("/auth/me");
        assert_eq!(me[0].header("Authorization"), Some("Bearer t-1"));
    }
}
