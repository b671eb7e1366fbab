// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use crate::utils::capitalize_string;

/// Raw species data as reported by the data source, before any presentation work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesEntry {
    pub dex_number: u32,
    /// Name in PokéApi format (lowercase, kebab-case)
    pub name: String,
    pub types: Vec<String>,
    pub sprite_url: Option<String>,
}

/// Result of a successful lookup, everything the main page needs to show a Pokémon
#[derive(Clone, PartialEq, Eq)]
pub struct PokemonRecord {
    pub dex_number: u32,
    pub display_name: String,
    /// Types in the order reported by the data source (primary type first)
    pub types: Vec<String>,
    pub sprite_image: Option<SpriteImage>,
}

impl Debug for PokemonRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokemonRecord")
            .field("dex_number", &self.dex_number)
            .field("display_name", &self.display_name)
            .field("types", &self.types)
            .field("has_sprite", &self.sprite_image.is_some())
            .finish()
    }
}

impl PokemonRecord {
    /// Builds the record out of the species data and the (optional) decoded sprite
    pub fn new(entry: SpeciesEntry, sprite_image: Option<SpriteImage>) -> Self {
        Self {
            dex_number: entry.dex_number,
            display_name: capitalize_string(&entry.name),
            types: entry.types,
            sprite_image,
        }
    }

    /// Types ready to be displayed, ex: "Grass / Poison"
    pub fn types_label(&self) -> String {
        self.types
            .iter()
            .map(|t| capitalize_string(t))
            .collect::<Vec<String>>()
            .join(" / ")
    }
}

/// Decoded RGBA8 bitmap of a Pokémon sprite
#[derive(Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Debug for SpriteImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bulbasaur() -> SpeciesEntry {
        SpeciesEntry {
            dex_number: 1,
            name: "bulbasaur".to_string(),
            types: vec!["grass".to_string(), "poison".to_string()],
            sprite_url: None,
        }
    }

    #[test]
    fn test_record_title_cases_the_name() {
        let record = PokemonRecord::new(bulbasaur(), None);
        assert_eq!(record.display_name, "Bulbasaur");
        assert_eq!(record.dex_number, 1);
    }

    #[test]
    fn test_record_keeps_type_order() {
        let record = PokemonRecord::new(bulbasaur(), None);
        assert_eq!(record.types, vec!["grass", "poison"]);
        assert_eq!(record.types_label(), "Grass / Poison");
    }

    #[test]
    fn test_kebab_case_names_are_split() {
        let entry = SpeciesEntry {
            name: "mr-mime".to_string(),
            ..bulbasaur()
        };
        assert_eq!(PokemonRecord::new(entry, None).display_name, "Mr Mime");
    }
}
