// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Display;

use crate::core::lookup::LookupError;

/// A normalized search token, either a National Dex number or a Pokémon name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupQuery {
    Id(u32),
    Name(String),
}

impl LookupQuery {
    /// Parses the raw text of the search field.
    ///
    /// The input is trimmed and lower-cased. Blank input, or input that is just the
    /// placeholder prompt, is an [`LookupError::EmptyQuery`]. Digit-only tokens become
    /// ids; `0` and ids that do not fit in a `u32` can never match and are rejected
    /// here, without touching the network.
    pub fn parse(input: &str, placeholder: &str) -> Result<Self, LookupError> {
        let token = input.trim().to_lowercase();

        if token.is_empty() || token == placeholder.trim().to_lowercase() {
            return Err(LookupError::EmptyQuery);
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            return match token.parse::<u32>() {
                Ok(id) if id > 0 => Ok(Self::Id(id)),
                _ => Err(LookupError::NotFound(token)),
            };
        }

        // PokéApi spells multi-word names in kebab-case (mr-mime, tapu-koko...)
        let name = token.split_whitespace().collect::<Vec<&str>>().join("-");

        Ok(Self::Name(name))
    }
}

impl Display for LookupQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupQuery::Id(id) => write!(f, "{id}"),
            LookupQuery::Name(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PLACEHOLDER: &str = "Search from 1 until 650 or by name";

    #[test]
    fn test_parse_name_is_trimmed_and_lowercased() {
        let query = LookupQuery::parse("  PikaChu \n", PLACEHOLDER);
        assert_eq!(query, Ok(LookupQuery::Name("pikachu".to_string())));
    }

    #[test]
    fn test_parse_numeric_token_becomes_id() {
        assert_eq!(LookupQuery::parse("25", PLACEHOLDER), Ok(LookupQuery::Id(25)));
        assert_eq!(LookupQuery::parse(" 007 ", PLACEHOLDER), Ok(LookupQuery::Id(7)));
    }

    #[test]
    fn test_parse_blank_input_is_empty_query() {
        assert_eq!(LookupQuery::parse("", PLACEHOLDER), Err(LookupError::EmptyQuery));
        assert_eq!(LookupQuery::parse("   \t", PLACEHOLDER), Err(LookupError::EmptyQuery));
    }

    #[test]
    fn test_parse_placeholder_is_empty_query() {
        assert_eq!(
            LookupQuery::parse(PLACEHOLDER, PLACEHOLDER),
            Err(LookupError::EmptyQuery)
        );
        assert_eq!(
            LookupQuery::parse("search from 1 until 650 or by name", PLACEHOLDER),
            Err(LookupError::EmptyQuery)
        );
    }

    #[test]
    fn test_parse_impossible_ids_are_not_found() {
        assert_eq!(
            LookupQuery::parse("0", PLACEHOLDER),
            Err(LookupError::NotFound("0".to_string()))
        );
        assert_eq!(
            LookupQuery::parse("99999999999", PLACEHOLDER),
            Err(LookupError::NotFound("99999999999".to_string()))
        );
    }

    #[test]
    fn test_parse_multi_word_names_use_kebab_case() {
        assert_eq!(
            LookupQuery::parse("Mr   Mime", PLACEHOLDER),
            Ok(LookupQuery::Name("mr-mime".to_string()))
        );
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(LookupQuery::Id(25).to_string(), "25");
        assert_eq!(LookupQuery::Name("eevee".to_string()).to_string(), "eevee");
    }
}
