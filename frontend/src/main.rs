//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(feature = "web")]
    {
        use frontend::app::MOUNT_POINT_ID;
        dioxus::LaunchBuilder::new()
            .with_cfg(dioxus::web::Config::new().rootname(MOUNT_POINT_ID))
            .launch(App);
    }

    #[cfg(not(feature = "web"))]
    dioxus::launch(App);
}
