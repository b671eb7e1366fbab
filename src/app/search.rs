// SPDX-License-Identifier: GPL-3.0-only

use std::ops::RangeInclusive;

use cosmic::widget::image;
use rand::Rng;

use crate::{
    core::lookup::LookupError,
    entities::{LookupQuery, PokemonRecord},
};

/// Ids the "Get Lucky!" button picks from
pub const RANDOM_ID_RANGE: RangeInclusive<u32> = 1..=650;

/// What the main page shows below the search bar
#[derive(Debug, Default)]
pub enum RenderState {
    /// Nothing searched yet
    #[default]
    Idle,
    /// Last lookup succeeded
    Displaying(DisplayedPokemon),
    /// Last lookup failed
    Failed(LookupError),
}

/// A looked up Pokémon ready to be drawn.
///
/// Owns the only image handle on screen, it's dropped together with the state on the next render.
#[derive(Debug)]
pub struct DisplayedPokemon {
    pub dex_number: u32,
    pub name: String,
    pub types: String,
    pub sprite: Option<image::Handle>,
}

impl From<PokemonRecord> for DisplayedPokemon {
    fn from(record: PokemonRecord) -> Self {
        let types = record.types_label();
        let sprite = record
            .sprite_image
            .map(|sprite| image::Handle::from_rgba(sprite.width, sprite.height, sprite.pixels));

        Self {
            dex_number: record.dex_number,
            name: record.display_name,
            types,
            sprite,
        }
    }
}

impl DisplayedPokemon {
    /// National Dex number as shown under the name
    pub fn dex_label(&self) -> String {
        format!("#{}", self.dex_number)
    }
}

/// State of the search page: the text field, the lookup in flight and the last result
#[derive(Debug)]
pub struct SearchSurface {
    input: String,
    placeholder: String,
    state: RenderState,
    in_flight: bool,
}

impl SearchSurface {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            placeholder: placeholder.into(),
            state: RenderState::Idle,
            in_flight: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Whether a lookup has been started and hasn't finished yet
    pub fn is_searching(&self) -> bool {
        self.in_flight
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    /// Starts a lookup for the current input.
    ///
    /// Returns the query to resolve, or `None` when there is nothing to look up: either a
    /// lookup is already running, or the input was rejected and the page now shows the error.
    pub fn submit(&mut self) -> Option<LookupQuery> {
        if self.in_flight {
            return None;
        }

        match LookupQuery::parse(&self.input, &self.placeholder) {
            Ok(query) => self.start(query),
            Err(e) => {
                self.state = RenderState::Failed(e);
                None
            }
        }
    }

    /// Starts a lookup for a random Pokémon in [`RANDOM_ID_RANGE`]
    pub fn random_pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<LookupQuery> {
        if self.in_flight {
            return None;
        }

        let id = rng.random_range(RANDOM_ID_RANGE);
        self.start(LookupQuery::Id(id))
    }

    fn start(&mut self, query: LookupQuery) -> Option<LookupQuery> {
        tracing::debug!("looking up {query}");
        self.in_flight = true;
        Some(query)
    }

    /// Applies the outcome of the lookup, the previous result is replaced as a whole
    pub fn finish(&mut self, result: Result<PokemonRecord, LookupError>) {
        self.in_flight = false;
        self.state = match result {
            Ok(record) => RenderState::Displaying(DisplayedPokemon::from(record)),
            Err(e) => {
                tracing::info!("lookup failed: {e}");
                RenderState::Failed(e)
            }
        };
    }
}
