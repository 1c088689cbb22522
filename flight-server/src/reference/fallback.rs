//! Built-in reference records used when the open-data source is unreachable.

use super::record::{AirlineRecord, AirportRecord};

/// Fixed airport set served when fetching or decoding fails.
pub fn fallback_airports() -> Vec<AirportRecord> {
    vec![
        AirportRecord::named("GRU", "Guarulhos International Airport", "São Paulo", "Brazil"),
        AirportRecord::named("SDU", "Santos Dumont", "Rio de Janeiro", "Brazil"),
        AirportRecord::named("CGH", "Congonhas", "São Paulo", "Brazil"),
        AirportRecord::named("GIG", "Galeão", "Rio de Janeiro", "Brazil"),
        AirportRecord::named(
            "JFK",
            "John F. Kennedy International Airport",
            "New York",
            "United States",
        ),
        AirportRecord::named(
            "LAX",
            "Los Angeles International Airport",
            "Los Angeles",
            "United States",
        ),
    ]
}

/// Fixed airline set served when fetching or decoding fails.
pub fn fallback_airlines() -> Vec<AirlineRecord> {
    vec![
        AirlineRecord::named("G3", "GOL", "Brazil"),
        AirlineRecord::named("JJ", "TAM", "Brazil"),
        AirlineRecord::named("AD", "Azul", "Brazil"),
        AirlineRecord::named("AA", "American Airlines", "United States"),
        AirlineRecord::named("DL", "Delta Air Lines", "United States"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airport_fallback_contents() {
        let airports = fallback_airports();
        assert!(airports.len() >= 6);
        assert!(airports.iter().any(|a| a.iata_code == "GRU"));
        assert!(airports.iter().all(|a| a.iata_code.len() == 3));
    }

    #[test]
    fn airline_fallback_contents() {
        let airlines = fallback_airlines();
        assert!(airlines.len() >= 5);
        assert!(airlines.iter().any(|a| a.iata_code == "AA"));
    }

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_airports(), fallback_airports());
        assert_eq!(fallback_airlines(), fallback_airlines());
    }
}
