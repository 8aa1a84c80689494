//! Planar distance models over latitude/longitude.
//!
//! Both models treat latitude and longitude as orthogonal axes of a flat
//! plane; results are in (scaled) degrees. This preserves local neighborhood
//! relationships, which is all the search needs, and is not a geodesic
//! distance.

use crate::City;

/// A pure cost function between two cities.
///
/// Must satisfy `d(a, a) == 0` and `d(a, b) == d(b, a)`.
pub trait DistanceModel: Send + Sync {
    fn distance(&self, a: &City, b: &City) -> f64;
}

/// Raw Euclidean distance in degrees: `sqrt(Δlat² + Δlon²)`.
///
/// # Examples
///
/// ```
/// use u_anneal::City;
/// use u_anneal::distance::{DistanceModel, Planar};
///
/// let a = City::new("a", 0.0, 0.0);
/// let b = City::new("b", 3.0, 4.0);
/// assert!((Planar.distance(&a, &b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Planar;

impl DistanceModel for Planar {
    fn distance(&self, a: &City, b: &City) -> f64 {
        let dlat = a.latitude() - b.latitude();
        let dlon = a.longitude() - b.longitude();
        dlat.hypot(dlon)
    }
}

/// Equirectangular projection around a fixed reference latitude.
///
/// Longitude differences are scaled by `cos(reference_latitude)` to correct
/// for meridian convergence within the dataset's latitude band. Because the
/// scale factor is fixed, the result is still a Euclidean metric and the
/// triangle inequality holds exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equirectangular {
    /// Reference latitude in degrees.
    pub reference_latitude: f64,
}

impl Equirectangular {
    pub fn new(reference_latitude: f64) -> Self {
        Self { reference_latitude }
    }

    /// Uses the mean latitude of `cities` as the reference.
    ///
    /// Falls back to the equator for an empty slice.
    pub fn for_cities(cities: &[City]) -> Self {
        if cities.is_empty() {
            return Self::new(0.0);
        }
        let mean = cities.iter().map(City::latitude).sum::<f64>() / cities.len() as f64;
        Self::new(mean)
    }

    fn longitude_scale(&self) -> f64 {
        self.reference_latitude.to_radians().cos()
    }
}

impl DistanceModel for Equirectangular {
    fn distance(&self, a: &City, b: &City) -> f64 {
        let dlat = a.latitude() - b.latitude();
        let dlon = (a.longitude() - b.longitude()) * self.longitude_scale();
        dlat.hypot(dlon)
    }
}
