// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use cosmic::{
    cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry},
    theme,
};
use serde::{Deserialize, Serialize};

pub const APP_ID: &str = "dev.mariinkys.DexLookup";

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    pub app_theme: AppTheme,
    pub sprite_size: SpriteSize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: Default::default(),
            sprite_size: Default::default(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Handler used to read and write the config entries of the app
    pub fn config_handler() -> Option<cosmic_config::Config> {
        match cosmic_config::Config::new(APP_ID, Self::VERSION) {
            Ok(handler) => Some(handler),
            Err(e) => {
                tracing::error!("failed to open the config: {e}");
                None
            }
        }
    }

    /// Current config, falls back to the defaults for any entry that can't be read
    pub fn config() -> Config {
        match Self::config_handler() {
            Some(handler) => Self::get_entry(&handler).unwrap_or_else(|(errors, config)| {
                for e in errors {
                    tracing::debug!("error loading config entry: {e}");
                }
                config
            }),
            None => Config::default(),
        }
    }

    /// Upper bound for each network call of a lookup
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AppTheme {
    Dark,
    Light,
    #[default]
    System,
}

impl AppTheme {
    /// Order of the options in the settings dropdown
    pub const ALL: &'static [Self] = &[Self::System, Self::Dark, Self::Light];

    pub fn theme(&self) -> theme::Theme {
        match self {
            Self::Dark => theme::Theme::dark(),
            Self::Light => theme::Theme::light(),
            Self::System => theme::system_preference(),
        }
    }
}

/// Size of the square the sprite is drawn in
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum SpriteSize {
    #[default]
    Small,
    Large,
}

impl SpriteSize {
    /// Order of the options in the settings dropdown
    pub const ALL: &'static [Self] = &[Self::Small, Self::Large];

    pub fn pixels(&self) -> u32 {
        match self {
            Self::Small => 120,
            Self::Large => 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_theme, AppTheme::System);
        assert_eq!(config.sprite_size.pixels(), 120);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_sprite_sizes() {
        assert_eq!(SpriteSize::Small.pixels(), 120);
        assert_eq!(SpriteSize::Large.pixels(), 250);
    }
}
