//! Texgen Client
//!
//! Yew WASM frontend: the draggable node canvas and the texture preview.
//!
//! Build and serve with `trunk serve` from this crate's directory.

mod app;
mod components;
mod error;
mod hooks;
mod util;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    // Read before the app mounts so the stored filter applies to startup logs too.
    let config = hooks::load_editor_config();
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::info!("texgen client starting, log filter '{}'", config.log_filter);

    yew::Renderer::<App>::new().render();
}
