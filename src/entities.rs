// SPDX-License-Identifier: GPL-3.0-only

mod lookup_query;
mod pokemon_record;

pub use lookup_query::LookupQuery;
pub use pokemon_record::{PokemonRecord, SpeciesEntry, SpriteImage};
