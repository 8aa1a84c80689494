//! City records and the thin dataset layer around them.
//!
//! The annealing engine only ever sees coordinates through a
//! [`Distances`](crate::distance::Distances) source. This module provides the
//! pieces that feed it: an immutable [`City`] record, uniform sampling of a
//! subset, and (with the `serde` feature) a JSON loader for datasets shaped
//! like `[{"city": .., "state": .., "latitude": .., "longitude": ..}, ..]`.

use crate::error::ConfigError;
use rand::seq::index;
use rand::Rng;

/// Decimal places kept for stored coordinates.
pub const COORDINATE_PRECISION: i32 = 6;

fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    (value * scale).round() / scale
}

/// A named point, created once at load time and never mutated.
///
/// Coordinates are rounded to [`COORDINATE_PRECISION`] decimal places.
///
/// # Examples
///
/// ```
/// use u_anneal::City;
///
/// let c = City::new("Austin, Texas", 30.2671534, -97.7430608);
/// assert_eq!(c.latitude(), 30.267153);
/// assert_eq!(c.longitude(), -97.743061);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    id: String,
    latitude: f64,
    longitude: f64,
}

impl City {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Picks `count` distinct cities uniformly at random, without replacement.
///
/// The returned order is random as well, so callers do not inherit any
/// ordering bias from the dataset.
pub fn sample_cities<R: Rng + ?Sized>(
    cities: &[City],
    count: usize,
    rng: &mut R,
) -> Result<Vec<City>, ConfigError> {
    if count > cities.len() {
        return Err(ConfigError::SampleTooLarge {
            requested: count,
            available: cities.len(),
        });
    }
    let picked = index::sample(rng, cities.len(), count);
    Ok(picked.iter().map(|i| cities[i].clone()).collect())
}

#[cfg(feature = "serde")]
mod dataset {
    use super::City;
    use crate::error::Result;
    use serde::Deserialize;
    use std::io::Read;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    impl Coordinate {
        fn value(&self) -> std::result::Result<f64, String> {
            match self {
                Coordinate::Number(v) => Ok(*v),
                Coordinate::Text(s) => s
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid coordinate {s:?}")),
            }
        }
    }

    #[derive(Deserialize)]
    struct Record {
        city: String,
        #[serde(default)]
        state: Option<String>,
        latitude: Coordinate,
        longitude: Coordinate,
    }

    fn custom_error(msg: String) -> serde_json::Error {
        <serde_json::Error as serde::de::Error>::custom(msg)
    }

    /// Loads a city dataset from JSON.
    ///
    /// Each record needs `city`, `latitude` and `longitude`; `state` is
    /// optional. Coordinates may be JSON numbers or numeric strings. The
    /// city id becomes `"<city>, <state>"` when a state is present.
    pub fn load_cities_json<R: Read>(reader: R) -> Result<Vec<City>> {
        let records: Vec<Record> = serde_json::from_reader(reader)?;
        records
            .into_iter()
            .map(|r| {
                let lat = r.latitude.value().map_err(custom_error);
                let lon = r.longitude.value().map_err(custom_error);
                let id = match r.state {
                    Some(state) => format!("{}, {}", r.city, state),
                    None => r.city,
                };
                Ok(City::new(id, lat?, lon?))
            })
            .collect::<std::result::Result<Vec<_>, serde_json::Error>>()
            .map_err(Into::into)
    }
}

#[cfg(feature = "serde")]
pub use dataset::load_cities_json;
