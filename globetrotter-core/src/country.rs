use serde::{Deserialize, Serialize};

/// Placeholder shown for any optional field the data source left out
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
}

/// International direct dialing prefix, split the way REST Countries ships it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PhoneCode {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: Option<String>,
}

/// One country record as served by the REST Countries v3.1 API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub cca3: String,
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub idd: PhoneCode,
    #[serde(default)]
    pub flags: Flags,
}

impl Country {
    pub fn id(&self) -> &str {
        &self.cca3
    }

    pub fn display_name(&self) -> &str {
        &self.name.common
    }

    /// First listed capital, or the placeholder
    pub fn capital_display(&self) -> &str {
        self.capital
            .first()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn subregion_display(&self) -> &str {
        self.subregion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn population_display(&self) -> String {
        match self.population {
            Some(population) => format_population(population),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Root followed by the first suffix, e.g. "+4" + "9" => "+49"
    pub fn phone_code(&self) -> String {
        let root = self.idd.root.as_deref().unwrap_or("");
        let suffix = self.idd.suffixes.first().map(String::as_str).unwrap_or("");
        format!("{}{}", root, suffix)
    }

    pub fn flag_url(&self) -> Option<&str> {
        self.flags.png.as_deref()
    }
}

/// Group digits in threes with commas (en-US style)
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
pub(crate) fn sample(cca3: &str, name: &str) -> Country {
    Country {
        cca3: cca3.to_string(),
        name: CountryName {
            common: name.to_string(),
            official: None,
        },
        capital: Vec::new(),
        region: "Europe".to_string(),
        subregion: None,
        population: None,
        idd: PhoneCode::default(),
        flags: Flags::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rest_countries_record() {
        let json = r#"{
            "name": {"common": "Germany", "official": "Federal Republic of Germany"},
            "cca3": "DEU",
            "capital": ["Berlin"],
            "region": "Europe",
            "subregion": "Western Europe",
            "population": 83240525,
            "idd": {"root": "+4", "suffixes": ["9"]},
            "flags": {"png": "https://flagcdn.com/w320/de.png", "alt": "Germany flag"}
        }"#;

        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.id(), "DEU");
        assert_eq!(country.display_name(), "Germany");
        assert_eq!(country.capital_display(), "Berlin");
        assert_eq!(country.subregion_display(), "Western Europe");
        assert_eq!(country.population_display(), "83,240,525");
        assert_eq!(country.phone_code(), "+49");
        assert_eq!(country.flag_url(), Some("https://flagcdn.com/w320/de.png"));
    }

    #[test]
    fn test_missing_optional_fields_use_placeholder() {
        // Antarctica ships without capital, subregion or dialing code
        let json = r#"{"name": {"common": "Antarctica"}, "cca3": "ATA", "region": "Antarctic"}"#;

        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.capital_display(), NOT_AVAILABLE);
        assert_eq!(country.subregion_display(), NOT_AVAILABLE);
        assert_eq!(country.population_display(), NOT_AVAILABLE);
        assert_eq!(country.phone_code(), "");
        assert_eq!(country.flag_url(), None);
    }

    #[test]
    fn test_phone_code_without_suffixes() {
        let mut country = sample("USA", "United States");
        country.idd.root = Some("+1".to_string());
        assert_eq!(country.phone_code(), "+1");
    }

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(38_000), "38,000");
        assert_eq!(format_population(1_402_112_000), "1,402,112,000");
    }
}
