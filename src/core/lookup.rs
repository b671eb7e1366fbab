// SPDX-License-Identifier: GPL-3.0-only

use std::future::Future;

use anywho::Error;

use crate::{
    core::sprite::decode_sprite,
    entities::{LookupQuery, PokemonRecord, SpeciesEntry, SpriteImage},
};

/// Why a lookup did not produce a [`PokemonRecord`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing (or only the placeholder prompt) was typed in the search field
    #[error("no Pokémon name or id was entered")]
    EmptyQuery,
    /// The data source has no Pokémon for this token
    #[error("no Pokémon matches `{0}`")]
    NotFound(String),
    /// The data source could not be reached or answered with something we can't read
    #[error("Pokémon data is unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a token into the core species fields.
pub trait SpeciesSource: Send + Sync {
    fn species(
        &self,
        query: &LookupQuery,
    ) -> impl Future<Output = Result<SpeciesEntry, LookupError>> + Send;
}

/// Downloads the raw bytes of a sprite.
pub trait SpriteFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// Two-stage lookup: species data first, sprite art second.
///
/// Only the first stage can fail the lookup, a sprite that can't be fetched or decoded
/// leaves the record without an image.
#[derive(Debug, Clone)]
pub struct LookupGateway<S, F> {
    source: S,
    sprites: F,
}

impl<S: SpeciesSource, F: SpriteFetcher> LookupGateway<S, F> {
    pub fn new(source: S, sprites: F) -> Self {
        Self { source, sprites }
    }

    /// Resolves the query, sprites are resized to `sprite_size`x`sprite_size`
    pub async fn resolve(
        &self,
        query: &LookupQuery,
        sprite_size: u32,
    ) -> Result<PokemonRecord, LookupError> {
        let entry = self.source.species(query).await?;

        if entry.types.is_empty() {
            return Err(LookupError::Unavailable(format!(
                "{} has no types",
                entry.name
            )));
        }

        let sprite_image = match &entry.sprite_url {
            Some(url) => match self.load_sprite(url, sprite_size).await {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!("sprite for {} unavailable: {e}", entry.name);
                    None
                }
            },
            None => {
                tracing::debug!("{} has no sprite", entry.name);
                None
            }
        };

        Ok(PokemonRecord::new(entry, sprite_image))
    }

    async fn load_sprite(
        &self,
        url: &str,
        sprite_size: u32,
    ) -> Result<SpriteImage, Error> {
        let bytes = self.sprites.fetch(url).await?;
        decode_sprite(&bytes, sprite_size)
    }
}
