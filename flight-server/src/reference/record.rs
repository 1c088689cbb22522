//! Reference record types served to autocomplete.

use serde::{Deserialize, Serialize};

/// An airport from the open-data reference set.
///
/// `iata_code` is always exactly three characters once a record has
/// passed the parser's final filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub iata_code: String,
    pub icao_code: Option<String>,
    pub airport_name: String,
    pub city_name: String,
    pub country_name: String,
    pub timezone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// An active airline from the open-data reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineRecord {
    pub iata_code: String,
    pub icao_code: Option<String>,
    pub airline_name: String,
    pub country_name: String,
    pub callsign: Option<String>,
}

impl AirportRecord {
    /// Minimal record with only the fields the fallback set carries.
    pub(crate) fn named(iata: &str, name: &str, city: &str, country: &str) -> Self {
        Self {
            iata_code: iata.to_string(),
            icao_code: None,
            airport_name: name.to_string(),
            city_name: city.to_string(),
            country_name: country.to_string(),
            timezone: None,
            latitude: None,
            longitude: None,
        }
    }
}

impl AirlineRecord {
    /// Minimal record with only the fields the fallback set carries.
    pub(crate) fn named(iata: &str, name: &str, country: &str) -> Self {
        Self {
            iata_code: iata.to_string(),
            icao_code: None,
            airline_name: name.to_string(),
            country_name: country.to_string(),
            callsign: None,
        }
    }
}
