//! OpenFlights `.dat` parsing.
//!
//! The upstream files are comma-delimited with double-quoted text fields.
//! Rows are community-maintained and not always consistent, so a bad row is
//! rejected on its own and never aborts the rest of the file.

use tracing::debug;

use super::record::{AirlineRecord, AirportRecord};

/// Token the source uses for "field intentionally absent".
pub const NULL_SENTINEL: &str = "\\N";

/// Value of the airline `active` column for carriers still operating.
pub const ACTIVE_MARKER: &str = "Y";

/// Minimum column count for an airport row.
const AIRPORT_FIELDS: usize = 14;

/// Minimum column count for an airline row.
const AIRLINE_FIELDS: usize = 8;

mod airport_col {
    pub const NAME: usize = 1;
    pub const CITY: usize = 2;
    pub const COUNTRY: usize = 3;
    pub const IATA: usize = 4;
    pub const ICAO: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
    pub const TZ_NAME: usize = 11;
}

mod airline_col {
    pub const NAME: usize = 1;
    pub const IATA: usize = 3;
    pub const ICAO: usize = 4;
    pub const CALLSIGN: usize = 5;
    pub const COUNTRY: usize = 6;
    pub const ACTIVE: usize = 7;
}

/// Why a single line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineRejection {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("IATA code is empty or null")]
    MissingCode,

    #[error("airline is not marked active")]
    Inactive,

    #[error("field {0} out of range")]
    MissingField(usize),
}

/// Split one line into fields, honouring double-quote state.
///
/// A `"` toggles quoting and is dropped from the output; a comma only
/// separates fields while quoting is off. The last field is always emitted,
/// so an empty line yields a single empty field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Parse a whole `airports.dat` body.
pub fn parse_airports(raw: &str) -> Vec<AirportRecord> {
    let (records, skipped) = parse_lines(raw, parse_airport_line);
    if skipped > 0 {
        debug!(skipped, "skipped malformed airport lines");
    }

    records.into_iter().filter(AirportRecord::is_listable).collect()
}

/// Parse a whole `airlines.dat` body. Inactive carriers are dropped.
pub fn parse_airlines(raw: &str) -> Vec<AirlineRecord> {
    let (records, skipped) = parse_lines(raw, parse_airline_line);
    if skipped > 0 {
        debug!(skipped, "skipped malformed or inactive airline lines");
    }

    records.into_iter().filter(AirlineRecord::is_listable).collect()
}

/// Run `parse_line` over every non-blank line, counting rejections.
fn parse_lines<T>(
    raw: &str,
    parse_line: impl Fn(&str) -> Result<T, LineRejection>,
) -> (Vec<T>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    (records, skipped)
}

/// Parse one airport row.
///
/// Columns: id, name, city, country, IATA, ICAO, latitude, longitude,
/// altitude, utc offset, DST, tz name, type, source.
pub fn parse_airport_line(line: &str) -> Result<AirportRecord, LineRejection> {
    let fields = split_fields(line);
    if fields.len() < AIRPORT_FIELDS {
        return Err(LineRejection::TooFewFields {
            expected: AIRPORT_FIELDS,
            found: fields.len(),
        });
    }

    let field = |i: usize| fields.get(i).ok_or(LineRejection::MissingField(i));

    let iata = field(airport_col::IATA)?;
    if is_null(iata) {
        return Err(LineRejection::MissingCode);
    }

    Ok(AirportRecord {
        iata_code: iata.clone(),
        icao_code: optional(field(airport_col::ICAO)?),
        airport_name: field(airport_col::NAME)?.clone(),
        city_name: field(airport_col::CITY)?.clone(),
        country_name: field(airport_col::COUNTRY)?.clone(),
        timezone: optional(field(airport_col::TZ_NAME)?),
        latitude: coordinate(field(airport_col::LATITUDE)?),
        longitude: coordinate(field(airport_col::LONGITUDE)?),
    })
}

/// Parse one airline row.
///
/// Columns: id, name, alias, IATA, ICAO, callsign, country, active.
pub fn parse_airline_line(line: &str) -> Result<AirlineRecord, LineRejection> {
    let fields = split_fields(line);
    if fields.len() < AIRLINE_FIELDS {
        return Err(LineRejection::TooFewFields {
            expected: AIRLINE_FIELDS,
            found: fields.len(),
        });
    }

    let field = |i: usize| fields.get(i).ok_or(LineRejection::MissingField(i));

    let iata = field(airline_col::IATA)?;
    if is_null(iata) {
        return Err(LineRejection::MissingCode);
    }
    if field(airline_col::ACTIVE)? != ACTIVE_MARKER {
        return Err(LineRejection::Inactive);
    }

    Ok(AirlineRecord {
        iata_code: iata.clone(),
        icao_code: optional(field(airline_col::ICAO)?),
        airline_name: field(airline_col::NAME)?.clone(),
        country_name: field(airline_col::COUNTRY)?.clone(),
        callsign: optional(field(airline_col::CALLSIGN)?),
    })
}

fn is_null(value: &str) -> bool {
    value.is_empty() || value == NULL_SENTINEL
}

/// Translate the null sentinel into `None` at the parse boundary.
fn optional(value: &str) -> Option<String> {
    (value != NULL_SENTINEL).then(|| value.to_string())
}

/// Latitude/longitude. Zero is treated as unknown, the same as garbage.
fn coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

impl AirportRecord {
    /// Final acceptance check applied after line parsing.
    fn is_listable(&self) -> bool {
        self.iata_code.chars().count() == 3 && !self.airport_name.is_empty()
    }
}

impl AirlineRecord {
    /// Final acceptance check applied after line parsing.
    fn is_listable(&self) -> bool {
        self.iata_code.chars().count() >= 2 && !self.airline_name.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Plain field text: no quotes, commas or line breaks.
    fn plain() -> impl Strategy<Value = String> {
        "[A-Za-z .'-]{1,20}"
    }

    proptest! {
        /// One well-formed airport line yields exactly one positionally mapped record.
        #[test]
        fn airport_line_maps_positionally(
            name in plain(),
            city in plain(),
            country in plain(),
            iata in "[A-Z]{3}",
            icao in "[A-Z]{4}",
        ) {
            let line = format!(
                r#"7,"{name}","{city}","{country}",{iata},{icao},1.5,2.5,0,0,U,Etc/UTC,airport,OurAirports"#
            );
            let airports = parse_airports(&line);
            prop_assert_eq!(airports.len(), 1);
            let a = &airports[0];
            prop_assert_eq!(&a.airport_name, &name);
            prop_assert_eq!(&a.city_name, &city);
            prop_assert_eq!(&a.country_name, &country);
            prop_assert_eq!(&a.iata_code, &iata);
            prop_assert_eq!(a.icao_code.as_deref(), Some(icao.as_str()));
        }

        /// Lines with fewer than 14 fields never produce a record and never panic.
        #[test]
        fn short_lines_are_skipped(fields in prop::collection::vec(plain(), 1..14)) {
            let line = fields.join(",");
            prop_assert!(parse_airports(&line).is_empty());
        }

        /// Quoted commas never split a field.
        #[test]
        fn quoted_commas_stay_together(a in plain(), b in plain()) {
            let line = format!(r#"x,"{a}, {b}",y"#);
            let fields = split_fields(&line);
            prop_assert_eq!(fields.len(), 3);
            prop_assert_eq!(&fields[1], &format!("{a}, {b}"));
        }

        /// Arbitrary input never panics.
        #[test]
        fn never_panics(raw in "\\PC{0,200}") {
            let _ = parse_airports(&raw);
            let _ = parse_airlines(&raw);
        }
    }
}
