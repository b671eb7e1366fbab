// SPDX-License-Identifier: GPL-3.0-only

/// Transforms a kebab-case string into a space-separated string where each word starts with an uppercase letter.
pub fn capitalize_string(input: &str) -> String {
    input
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first_char) => first_char.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_single_word() {
        assert_eq!(capitalize_string("pikachu"), "Pikachu");
    }

    #[test]
    fn test_capitalize_kebab_case() {
        assert_eq!(capitalize_string("tapu-koko"), "Tapu Koko");
    }

    #[test]
    fn test_capitalize_ignores_stray_dashes() {
        assert_eq!(capitalize_string("-porygon--z-"), "Porygon Z");
        assert_eq!(capitalize_string(""), "");
    }
}
