// SPDX-License-Identifier: GPL-3.0-only

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod core;
mod entities;
mod flags;
mod i18n;
mod utils;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let flags = flags::flags();

    // Settings for configuring the application window and iced runtime.
    let settings = crate::core::settings::get_app_settings(&flags.config);

    tracing::info!("Starting Dex Lookup v{}", env!("CARGO_PKG_VERSION"));

    // Starts the application's event loop with the loaded config as the application's flags.
    cosmic::app::run::<app::AppModel>(settings, flags)
}
