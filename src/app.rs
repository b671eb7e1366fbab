// SPDX-License-Identifier: GPL-3.0-only

use std::{collections::HashMap, sync::Arc};

use cosmic::{
    Application, ApplicationExt, Core, Element, Task,
    app::context_drawer,
    cosmic_config, cosmic_theme,
    iced::{
        Alignment, Length, Subscription,
        alignment::{Horizontal, Vertical},
    },
    theme,
    widget::{self, about::About, menu},
};

use crate::{
    app::{
        app_menu::MenuAction,
        context_page::ContextPage,
        search::{DisplayedPokemon, RenderState, SearchSurface},
    },
    config::{APP_ID, AppTheme, Config, SpriteSize},
    core::{
        api::{DexApi, DexGateway},
        lookup::LookupError,
    },
    entities::{LookupQuery, PokemonRecord},
    fl,
    flags::Flags,
};

mod app_menu;
mod context_page;
pub mod search;

const REPOSITORY: &str = "https://github.com/mariinkys/dexlookup";
const POKEAPI: &str = "https://pokeapi.co";

pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: Core,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// The about page for this app.
    about: About,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Application configuration handler
    config_handler: Option<cosmic_config::Config>,
    /// Configuration data that persists between application runs.
    config: Config,
    /// Labels for the theme dropdown, same order as [`AppTheme::ALL`]
    app_themes: Vec<String>,
    /// Labels for the sprite size dropdown, same order as [`SpriteSize::ALL`]
    sprite_sizes: Vec<String>,
    /// PokéApi lookups, `None` if the clients could not be created
    gateway: Option<Arc<DexGateway>>,
    /// Search field, lookup in flight and last result
    search: SearchSurface,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    UpdateConfig(Config),
    UpdateTheme(usize),
    UpdateSpriteSize(usize),

    SearchInput(String),
    Search,
    RandomPick,
    LookupFinished(Result<PokemonRecord, LookupError>),
}

impl Application for AppModel {
    type Executor = cosmic::executor::Default;

    type Flags = Flags;

    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .version(env!("CARGO_PKG_VERSION"))
            .license(env!("CARGO_PKG_LICENSE"))
            .links([
                (fl!("repository"), REPOSITORY),
                (fl!("pokeapi-credit"), POKEAPI),
            ]);

        let gateway = build_gateway(&flags.config);

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            key_binds: HashMap::new(),
            config_handler: flags.config_handler,
            config: flags.config,
            app_themes: theme_labels(),
            sprite_sizes: sprite_size_labels(),
            gateway,
            search: SearchSurface::new(fl!("search-placeholder")),
        };

        let command = app.update_title();

        (app, command)
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        vec![app_menu::menu_bar(&self.key_binds)]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        self.context_page.display(self)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = theme::active().cosmic().spacing;

        let content = widget::column()
            .push(self.search_row(&spacing))
            .push(self.result_card(&spacing))
            .align_x(Alignment::Center)
            .spacing(spacing.space_l)
            .width(Length::Fill);

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing.space_m)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Top)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        // Watch for application configuration changes.
        self.core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config))
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::LaunchUrl(url) => {
                if let Err(e) = open::that_detached(&url) {
                    tracing::error!("failed to open {url:?}: {e}");
                }
            }
            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    // Close the context drawer if the toggled context page is the same.
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    // Open the context drawer to display the requested context page.
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }
            Message::UpdateConfig(config) => {
                if config.request_timeout() != self.config.request_timeout() {
                    self.gateway = build_gateway(&config);
                }
                let theme_changed = config.app_theme != self.config.app_theme;
                self.config = config;

                if theme_changed {
                    return cosmic::command::set_theme(self.config.app_theme.theme());
                }
            }
            Message::UpdateTheme(index) => {
                let app_theme = AppTheme::ALL.get(index).copied().unwrap_or_default();
                self.save_config(|config, handler| config.set_app_theme(handler, app_theme));
                self.config.app_theme = app_theme;
                return cosmic::command::set_theme(app_theme.theme());
            }
            Message::UpdateSpriteSize(index) => {
                let sprite_size = SpriteSize::ALL.get(index).copied().unwrap_or_default();
                self.save_config(|config, handler| config.set_sprite_size(handler, sprite_size));
                self.config.sprite_size = sprite_size;
            }

            Message::SearchInput(input) => {
                self.search.set_input(input);
            }
            Message::Search => {
                if let Some(query) = self.search.submit() {
                    return self.lookup(query);
                }
            }
            Message::RandomPick => {
                if let Some(query) = self.search.random_pick(&mut rand::rng()) {
                    return self.lookup(query);
                }
            }
            Message::LookupFinished(result) => {
                self.search.finish(result);
            }
        }

        Task::none()
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let window_title = fl!("app-title");
        self.set_header_title(window_title.clone());

        if let Some(id) = self.core.main_window_id() {
            self.set_window_title(window_title, id)
        } else {
            Task::none()
        }
    }

    /// Resolves the query in the background and reports back with [`Message::LookupFinished`]
    fn lookup(&self, query: LookupQuery) -> Task<cosmic::Action<Message>> {
        let gateway = self.gateway.clone();
        let sprite_size = self.config.sprite_size.pixels();

        Task::perform(
            async move {
                match gateway {
                    Some(gateway) => gateway.resolve(&query, sprite_size).await,
                    None => Err(LookupError::Unavailable(
                        "the PokéApi client is not available".to_string(),
                    )),
                }
            },
            |result| cosmic::Action::App(Message::LookupFinished(result)),
        )
    }

    /// Writes a config entry, the in-memory value is updated by the caller either way
    fn save_config<F>(&mut self, set: F)
    where
        F: FnOnce(&mut Config, &cosmic_config::Config) -> Result<bool, cosmic_config::Error>,
    {
        if let Some(handler) = &self.config_handler {
            if let Err(e) = set(&mut self.config, handler) {
                tracing::error!("failed to save config: {e}");
            }
        }
    }

    /// Search field with the Search and Get Lucky! buttons
    fn search_row(&self, spacing: &cosmic_theme::Spacing) -> Element<'_, Message> {
        let idle = !self.search.is_searching();

        let search_input = widget::text_input(self.search.placeholder(), self.search.input())
            .on_input(Message::SearchInput)
            .on_submit(|_| Message::Search)
            .width(Length::Fill);

        let search_button =
            widget::button::suggested(fl!("search")).on_press_maybe(idle.then_some(Message::Search));

        let lucky_button = widget::button::standard(fl!("random-pick"))
            .on_press_maybe(idle.then_some(Message::RandomPick));

        widget::row()
            .push(search_input)
            .push(search_button)
            .push(lucky_button)
            .align_y(Alignment::Center)
            .spacing(spacing.space_xs)
            .into()
    }

    /// Pokémon card, error message or hint depending on the last lookup
    fn result_card(&self, spacing: &cosmic_theme::Spacing) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.search.state() {
            RenderState::Idle => widget::text::body(fl!("idle-hint")).into(),
            RenderState::Displaying(pokemon) => self.pokemon_details(pokemon, spacing),
            RenderState::Failed(error) => widget::text::title4(failure_message(error)).into(),
        };

        let mut card = widget::column()
            .push(body)
            .align_x(Alignment::Center)
            .spacing(spacing.space_xs);

        if self.search.is_searching() {
            card = card.push(widget::text::caption(fl!("searching")));
        }

        widget::container(card)
            .width(Length::Fill)
            .padding(spacing.space_m)
            .align_x(Horizontal::Center)
            .into()
    }

    /// Sprite, name, number and types of the displayed Pokémon
    fn pokemon_details(
        &self,
        pokemon: &DisplayedPokemon,
        spacing: &cosmic_theme::Spacing,
    ) -> Element<'_, Message> {
        let size = Length::Fixed(self.config.sprite_size.pixels() as f32);

        // an absent sprite keeps its space so the text doesn't jump around
        let sprite: Element<'_, Message> = match &pokemon.sprite {
            Some(handle) => widget::image(handle.clone())
                .width(size)
                .height(size)
                .into(),
            None => widget::Space::new(size, size).into(),
        };

        widget::column()
            .push(sprite)
            .push(widget::text::title2(pokemon.name.as_str()))
            .push(widget::text::body(pokemon.dex_label()))
            .push(widget::text::body(pokemon.types.as_str()))
            .align_x(Alignment::Center)
            .spacing(spacing.space_xxs)
            .into()
    }

    /// The settings page for this app.
    pub fn settings(&self) -> Element<'_, Message> {
        let theme_index = AppTheme::ALL
            .iter()
            .position(|t| *t == self.config.app_theme);
        let sprite_size_index = SpriteSize::ALL
            .iter()
            .position(|s| *s == self.config.sprite_size);

        widget::settings::view_column(vec![
            widget::settings::section()
                .title(fl!("appearance"))
                .add(
                    widget::settings::item::builder(fl!("theme")).control(widget::dropdown(
                        &self.app_themes,
                        theme_index,
                        Message::UpdateTheme,
                    )),
                )
                .into(),
            widget::settings::section()
                .title(fl!("sprites"))
                .add(
                    widget::settings::item::builder(fl!("sprite-size")).control(
                        widget::dropdown(
                            &self.sprite_sizes,
                            sprite_size_index,
                            Message::UpdateSpriteSize,
                        ),
                    ),
                )
                .into(),
        ])
        .into()
    }
}

/// Creates the PokéApi gateway with the configured timeout
fn build_gateway(config: &Config) -> Option<Arc<DexGateway>> {
    match DexApi::new(config.request_timeout()) {
        Ok(api) => Some(Arc::new(api.into_gateway())),
        Err(e) => {
            tracing::error!("failed to initialise the PokéApi client: {e}");
            None
        }
    }
}

/// Theme dropdown labels, indexed like [`AppTheme::ALL`]
fn theme_labels() -> Vec<String> {
    AppTheme::ALL
        .iter()
        .map(|app_theme| match app_theme {
            AppTheme::System => fl!("match-desktop"),
            AppTheme::Dark => fl!("dark"),
            AppTheme::Light => fl!("light"),
        })
        .collect()
}

/// Sprite size dropdown labels, indexed like [`SpriteSize::ALL`]
fn sprite_size_labels() -> Vec<String> {
    SpriteSize::ALL
        .iter()
        .map(|sprite_size| match sprite_size {
            SpriteSize::Small => fl!("small"),
            SpriteSize::Large => fl!("large"),
        })
        .collect()
}

/// Message shown in place of the Pokémon card when a lookup fails
fn failure_message(error: &LookupError) -> String {
    match error {
        LookupError::EmptyQuery => fl!("empty-query"),
        LookupError::NotFound(_) => fl!("not-found"),
        LookupError::Unavailable(_) => fl!("unavailable"),
    }
}
