//! Application composer: builds every application-wide capability and
//! publishes it as context on the root scope, in registration order.

use std::rc::Rc;

use anyhow::Context;
use common::composition::{AmbientBindings, Capability, CompositionPlan};
use common::route_table::{chatbot_routes, RouteTable};
use common::runtime_config::RuntimeConfig;
use common::theme::{ThemeConfig, ThemePreset};
use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use crate::api::http_client::HttpClient;
use crate::services::alert::AlertService;
use crate::services::confirm::ConfirmService;
use crate::services::toast::ToastService;

/// What the root component needs once every capability is in context.
#[derive(Clone)]
pub struct Composition {
    pub theme: Rc<ThemeConfig>,
    /// Capabilities in the order they were registered.
    pub capabilities: Vec<Capability>,
}

/// Must run inside the root component scope: each capability is provided as
/// context there, so every descendant view can reach it.
pub fn compose(config: RuntimeConfig) -> anyhow::Result<Composition> {
    let mut plan = CompositionPlan::new();

    let routes = Rc::new(chatbot_routes().context("Failed to build route table")?);
    register(&mut plan, Capability::Router)?;
    provide_context(routes);

    let http = HttpClient::new(config.api_base_url())?;
    info!("Chatbot API at {}", http.base_url());
    let ambient = AmbientBindings::new(config, http);
    register(&mut plan, Capability::HttpClient)?;
    provide_context(ambient.http.clone());

    let toast = ToastService::new(ambient.config.toast_life());
    register(&mut plan, Capability::Toast)?;
    provide_context(toast);

    let confirm = ConfirmService::new();
    register(&mut plan, Capability::Confirm)?;
    provide_context(confirm);

    let alert = AlertService::new();
    register(&mut plan, Capability::Alert)?;
    provide_context(alert);

    register(&mut plan, Capability::RuntimeConfig)?;
    provide_context(ambient.config);

    let theme = Rc::new(ThemeConfig::new(ThemePreset::Aura));
    register(&mut plan, Capability::Theme)?;
    provide_context(theme.clone());

    let capabilities = plan.finish()?;
    Ok(Composition { theme, capabilities })
}

fn register(plan: &mut CompositionPlan, capability: Capability) -> anyhow::Result<()> {
    plan.register(capability)?;
    info!("Registered {}", capability);
    Ok(())
}

pub fn use_routes() -> Rc<RouteTable> {
    use_context::<Rc<RouteTable>>()
}

/// Shared HTTP client; the same instance in every view.
pub fn use_http() -> Rc<HttpClient> {
    use_context::<Rc<HttpClient>>()
}

/// Read-only runtime configuration snapshot.
pub fn use_runtime_config() -> Rc<RuntimeConfig> {
    use_context::<Rc<RuntimeConfig>>()
}
