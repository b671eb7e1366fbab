// SPDX-License-Identifier: GPL-3.0-only

use cosmic::{
    app::Settings,
    iced::{Limits, Size},
};

use crate::config::Config;

/// Window and runtime settings, the window is sized around a single Pokémon card
pub fn get_app_settings(config: &Config) -> Settings {
    let mut settings = Settings::default();

    settings = settings.theme(config.app_theme.theme());
    settings = settings.size_limits(Limits::NONE.min_width(380.0).min_height(480.0));
    settings = settings.size(Size::new(460.0, 640.0));
    settings = settings.debug(false);
    settings
}
