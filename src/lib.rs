// ============================================================================
// AETHERIS CLIENT - Sesión, cliente HTTP y vistas con sondeo (Rust + WASM)
// ============================================================================
// - Stores: SessionStore, único escritor del token
// - Services: ApiClient + servicios tipados + feed de sondeo
// - ViewModels: ResourceView {data, loading, error} + guardas de acceso
// - State: estado reactivo con suscripciones cancelables
// - Runtime / Transport / TokenStorage / Navigator: puntos de inyección
//   (navegador en wasm32, dobles en los tests)
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod runtime;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
pub mod hooks;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use app::{AppContext, Navigator, Shell};
pub use config::{ClientConfig, CONFIG};
pub use error::{ApiError, StorageError, TransportError};
pub use models::{Session, Snapshot};
pub use services::{ApiClient, ResourceFeed, ResourceSpec};
pub use stores::SessionStore;
pub use viewmodels::{Access, AccessPolicy, ResourceView};

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::{dispatch_unauthorized, AppContext, BrowserNavigator, Shell};
    use crate::config::CONFIG;
    use crate::runtime::BrowserRuntime;
    use crate::services::FetchTransport;
    use crate::state::Subscription;
    use crate::utils::BrowserStorage;

    // Instancia global: vive lo que vive la página
    thread_local! {
        static SHELL: RefCell<Option<(Shell, Subscription)>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = CONFIG.clone();
        if config.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 Aetheris client - Rust + WASM");

        let ctx = AppContext::new(
            config,
            Rc::new(FetchTransport::new()),
            Rc::new(BrowserStorage),
            Rc::new(BrowserRuntime),
        );

        // Aviso al código JS que no pasa por el crate
        let forward = ctx.session.on_unauthenticated(|| {
            if let Err(e) = dispatch_unauthorized() {
                log::error!("❌ No se pudo emitir auth:unauthorized: {:?}", e);
            }
        });

        let shell = Shell::start(ctx, Rc::new(BrowserNavigator));
        SHELL.with(|cell| *cell.borrow_mut() = Some((shell, forward)));
        Ok(())
    }

    /// Runs `f` against the page's shell, once `start` has run.
    pub fn with_shell<R>(f: impl FnOnce(&Shell) -> R) -> Option<R> {
        SHELL.with(|cell| cell.borrow().as_ref().map(|(shell, _)| f(shell)))
    }

    /// Logout entry point for plain JS buttons.
    #[wasm_bindgen]
    pub fn logout() {
        with_shell(|shell| shell.context().session.logout());
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::with_shell;
