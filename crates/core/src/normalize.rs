//! Text normalization for matching city names and dish categories.
//!
//! City names are compared through a canonical key so that "Gdańsk" and
//! "gdansk" select the same places. Dish categories are stored trimmed and
//! lower-cased so category filters can match exactly.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Build the comparison key for a city name.
///
/// Decomposes to NFD, drops combining marks, folds `ł` (which has no
/// decomposition) to `l`, lower-cases and trims.
pub fn canonical_city_key(city: &str) -> String {
    city.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'ł' | 'Ł' => 'l',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize a dish category for storage and filtering.
pub fn normalize_dish_type(dish_type: &str) -> String {
    dish_type.trim().to_lowercase()
}

/// Treat absent, empty and whitespace-only filter values as "no filter".
pub fn non_empty_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_key_strips_polish_diacritics() {
        assert_eq!(canonical_city_key("Gdańsk"), "gdansk");
        assert_eq!(canonical_city_key("Gdansk"), "gdansk");
    }

    #[test]
    fn city_key_folds_l_stroke() {
        assert_eq!(canonical_city_key("Łódź"), "lodz");
    }

    #[test]
    fn city_key_trims_and_lowercases() {
        assert_eq!(canonical_city_key("  KRAKÓW "), "krakow");
    }

    #[test]
    fn city_key_handles_precomposed_and_decomposed_input() {
        let decomposed = "Zielona Go\u{301}ra";
        assert_eq!(canonical_city_key(decomposed), canonical_city_key("Zielona Góra"));
    }

    #[test]
    fn dish_type_is_trimmed_and_lowercased() {
        assert_eq!(normalize_dish_type("  Pizza "), "pizza");
    }

    #[test]
    fn empty_filters_are_unset() {
        assert_eq!(non_empty_filter(None), None);
        assert_eq!(non_empty_filter(Some("")), None);
        assert_eq!(non_empty_filter(Some("   ")), None);
        assert_eq!(non_empty_filter(Some(" pizza ")), Some("pizza"));
    }
}
