//! End-to-end scenarios: session store, HTTP client and polling views wired
//! together over the test doubles, driven by the virtual clock.


use std::rc::Rc;
use std::time::Duration;

use crate::app::{AppContext, Shell};
use crate::config::ClientConfig;
use crate::models::Profile;
use crate::testing::{ManualRuntime, MockTransport, RecordingNavigator};
use crate::utils::MemoryStorage;

pub(crate) const POLL: Duration = Duration::from_secs(15);

pub(crate) struct Harness {
    pub transport: Rc<MockTransport>,
    pub storage: Rc<MemoryStorage>,
    pub runtime: Rc<ManualRuntime>,
    pub navigator: Rc<RecordingNavigator>,
    pub ctx: AppContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        let transport = Rc::new(MockTransport::new());
        let storage = Rc::new(storage);
        let runtime = Rc::new(ManualRuntime::new());
        let config = ClientConfig::default().with_base_url("http://api.test/");
        let ctx = AppContext::new(config, transport.clone(), storage.clone(), runtime.clone());
        Self {
            transport,
            storage,
            runtime,
            navigator: Rc::new(RecordingNavigator::new()),
            ctx,
        }
    }

    pub fn start_shell(&self) -> Shell {
        Shell::start(self.ctx.clone(), self.navigator.clone())
    }

    /// Logged-in state without going through the network.
    pub fn sign_in(&self, token: &str) {
        self.ctx.session.set_token(Some(token.to_string()));
        self.ctx.session.set_user(Some(profile("medecin")));
    }
}

pub(crate) fn profile(role: &str) -> Profile {
    serde_json::from_value(serde_json::json!({
        "id": 12,
        "email": "camille.martin@aetheris.fr",
        "nom": "Martin",
        "prenom": "Camille",
        "role": role,
    }))
    .unwrap()
}
