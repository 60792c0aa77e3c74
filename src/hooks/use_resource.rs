// ============================================================================
// USE RESOURCE HOOK - Une un ResourceView al ciclo de vida del componente
// ============================================================================

use serde::de::DeserializeOwned;
use yew::prelude::*;

use crate::app::AppContext;
use crate::models::Snapshot;
use crate::services::ResourceSpec;

/// Polls `spec` while the component is mounted; a new `identifier` restarts it.
#[hook]
pub fn use_resource<T>(ctx: &AppContext, spec: ResourceSpec, identifier: Option<String>) -> Snapshot<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let snapshot = use_state(Snapshot::<T>::idle);
    let view = {
        let ctx = ctx.clone();
        use_memo(spec, move |spec| ctx.resource_view::<T>(*spec))
    };

    {
        let view = view.clone();
        let snapshot = snapshot.clone();
        use_effect_with(identifier, move |identifier| {
            view.set_identifier(identifier.clone());
            let changes = view.on_change(move |latest| snapshot.set(latest.clone()));
            view.mount();
            move || {
                drop(changes);
                view.unmount();
            }
        });
    }

    (*snapshot).clone()
}
