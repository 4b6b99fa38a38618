use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use crate::components::error_boundary::{ComponentErrorDisplay, GlobalErrorBoundary};
use crate::composer::compose;
use crate::host_config::load_runtime_config;
use crate::routes::Route;
use crate::services::alert::AlertPopupView;
use crate::services::confirm::ConfirmDialog;
use crate::services::toast::ToastContainer;

/// Id of the host document element the application mounts into.
pub const MOUNT_POINT_ID: &str = "app";

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let composition = use_hook(|| {
        load_runtime_config()
            .and_then(compose)
            .inspect(|composition| info!("Application composed: {:?}", composition.capabilities))
            .map_err(|e| {
                error!("Application start-up failed: {:#}", e);
                format!("{:#}", e)
            })
    });
    let composition = match composition {
        Ok(composition) => composition,
        Err(error_txt) => return rsx! { StartupFailure { error_txt } },
    };
    let theme_css = composition.theme.stylesheet();

    rsx! {
        // layer declaration must come before any other stylesheet
        document::Style { "{theme_css}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        GlobalErrorBoundary {
            boundary_name: "App".to_string(),
            Router::<Route> {}
        }
        ToastContainer {}
        ConfirmDialog {}
        AlertPopupView {}
    }
}

#[component]
fn StartupFailure(error_txt: ReadSignal<String>) -> Element {
    rsx! {
        document::Title { "Chatbot - start-up failed" }
        ComponentErrorDisplay { error_txt: error_txt() }
    }
}
