// ============================================================================
// APP - Cableado: config → ApiClient → SessionStore → feed → vistas
// ============================================================================

use std::rc::Rc;

use futures::FutureExt;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::runtime::Runtime;
use crate::services::{
    AnalysisService, ApiClient, AppointmentService, DocumentService, ExportService,
    NotificationService, PatientService, PollingFeed, ResourceFeed, ResourceSpec, SynthesisService,
    Transport, UserService,
};
use crate::state::{NoticeBoard, Subscription};
use crate::stores::SessionStore;
use crate::utils::constants::LOGIN_ROUTE;
use crate::utils::TokenStorage;
use crate::viewmodels::{check_access, login_redirect, Access, AccessPolicy, ResourceView};

/// Moves the user to another screen; routing itself lives in the host UI.
pub trait Navigator {
    fn navigate(&self, route: &str);
}

/// Everything a screen needs, built once per page load.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub session: SessionStore,
    pub feed: Rc<dyn ResourceFeed>,
    pub notices: NoticeBoard,
    pub runtime: Rc<dyn Runtime>,
}

impl AppContext {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        storage: Rc<dyn TokenStorage>,
        runtime: Rc<dyn Runtime>,
    ) -> Self {
        let client = ApiClient::new(&config, transport);
        let session = SessionStore::new(client.clone(), storage, config.token_storage_key.clone());
        let feed: Rc<dyn ResourceFeed> = Rc::new(PollingFeed::new(client.clone(), runtime.clone()));
        let notices = NoticeBoard::new(config.max_notices);

        log::info!("⚙️ API {} (timeout {:?})", client.base_url(), client.timeout());

        Self {
            config,
            client,
            session,
            feed,
            notices,
            runtime,
        }
    }

    /// Unmounted view over `spec`, posting its failures to the notice board.
    pub fn resource_view<T>(&self, spec: ResourceSpec) -> ResourceView<T>
    where
        T: DeserializeOwned + 'static,
    {
        ResourceView::new(spec, spec.every(&self.config), self.feed.clone(), self.session.clone())
            .with_notices(self.notices.clone())
    }

    pub fn patients(&self) -> PatientService {
        PatientService::new(self.client.clone())
    }

    pub fn exports(&self) -> ExportService {
        ExportService::new(self.client.clone())
    }

    pub fn appointments(&self) -> AppointmentService {
        AppointmentService::new(self.client.clone())
    }

    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(self.client.clone())
    }

    pub fn analyses(&self) -> AnalysisService {
        AnalysisService::new(self.client.clone())
    }

    pub fn syntheses(&self) -> SynthesisService {
        SynthesisService::new(self.client.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    pub fn documents(&self) -> DocumentService {
        DocumentService::new(self.client.clone())
    }
}

/// Application-wide reactions: restore at startup, back to login when the
/// server drops the session.
pub struct Shell {
    ctx: AppContext,
    navigator: Rc<dyn Navigator>,
    _unauthenticated: Subscription,
}

impl Shell {
    pub fn start(ctx: AppContext, navigator: Rc<dyn Navigator>) -> Self {
        let unauthenticated = {
            let notices = ctx.notices.clone();
            let navigator = navigator.clone();
            ctx.session.on_unauthenticated(move || {
                notices.warn(ApiError::Unauthorized.user_message());
                navigator.navigate(LOGIN_ROUTE);
            })
        };

        let session = ctx.session.clone();
        ctx.runtime.spawn(async move { session.restore().await }.boxed_local());

        Self {
            ctx,
            navigator,
            _unauthenticated: unauthenticated,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Decides access for a protected screen and performs the redirect, if any.
    pub fn enforce(&self, policy: &AccessPolicy) -> Access {
        let access = check_access(&self.ctx.session.snapshot(), policy);
        match &access {
            Access::RedirectToLogin => self.navigator.navigate(LOGIN_ROUTE),
            Access::Denied { redirect_to } => self.navigator.navigate(redirect_to),
            Access::Pending | Access::Granted => {}
        }
        access
    }

    /// Login screen: leave for the dashboard when already signed in.
    pub fn leave_login_page(&self) -> bool {
        match login_redirect(&self.ctx.session.snapshot()) {
            Some(route) => {
                self.navigator.navigate(route);
                true
            }
            None => false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsValue;
    use web_sys::{CustomEvent, CustomEventInit};

    use super::Navigator;
    use crate::utils::constants::UNAUTHORIZED_EVENT;

    /// Hash-based navigation (`#/login`), so any host router can listen to it.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn navigate(&self, route: &str) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_hash(route) {
                log::error!("❌ Navegación a {} fallida: {:?}", route, e);
            }
        }
    }

    /// `auth:unauthorized` on `window` for host code outside the crate.
    pub fn dispatch_unauthorized() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str("401"));
        let event = CustomEvent::new_with_event_init_dict(UNAUTHORIZED_EVENT, &init)?;
        window.dispatch_event(&event)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{dispatch_unauthorized, BrowserNavigator};
