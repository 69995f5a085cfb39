use crate::country::Country;
use std::collections::HashSet;

/// Countries whose code is in `favorites`, in the order of `all`
pub fn favorite_countries(all: &[Country], favorites: &HashSet<String>) -> Vec<Country> {
    if favorites.is_empty() {
        return Vec::new();
    }
    all.iter()
        .filter(|country| favorites.contains(country.id()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::sample;

    fn ids(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(Country::id).collect()
    }

    fn set(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_keeps_source_order() {
        let all = vec![
            sample("FRA", "France"),
            sample("DEU", "Germany"),
            sample("ITA", "Italy"),
            sample("ESP", "Spain"),
        ];
        // Set order is irrelevant, source order wins
        let result = favorite_countries(&all, &set(&["ESP", "FRA", "ITA"]));
        assert_eq!(ids(&result), vec!["FRA", "ITA", "ESP"]);
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let all = vec![sample("FRA", "France")];
        let result = favorite_countries(&all, &set(&["XXX", "FRA"]));
        assert_eq!(ids(&result), vec!["FRA"]);
    }

    #[test]
    fn test_empty_inputs() {
        let all = vec![sample("FRA", "France")];
        assert!(favorite_countries(&all, &HashSet::new()).is_empty());
        assert!(favorite_countries(&[], &set(&["FRA"])).is_empty());
    }

    #[test]
    fn test_result_is_subset_of_source_and_favorites() {
        let all: Vec<Country> = (0..30)
            .map(|i| sample(&format!("C{:02}", i), &format!("Country {}", i)))
            .collect();
        let favorites: HashSet<String> = (0..30)
            .filter(|i| i % 3 == 0)
            .map(|i| format!("C{:02}", i))
            .collect();

        let result = favorite_countries(&all, &favorites);
        assert_eq!(result.len(), 10);
        let mut last_position = None;
        for country in &result {
            assert!(favorites.contains(country.id()));
            let position = all.iter().position(|c| c == country).unwrap();
            if let Some(last) = last_position {
                assert!(position > last);
            }
            last_position = Some(position);
        }
    }
}
