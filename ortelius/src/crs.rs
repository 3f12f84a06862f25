//! Coordinate reference system identifiers and geographic coordinate pairs.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier of a coordinate reference system, e.g. `EPSG:4326`.
///
/// The configuration layer does not interpret the code itself. It is only
/// handed over to the map engine when a point must be converted between
/// reference systems, so any code the engine understands is valid here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(Cow<'static, str>);

impl Crs {
    /// WGS84 longitude/latitude, the default reference system at the API boundary.
    pub const WGS84: Crs = Crs(Cow::Borrowed("EPSG:4326"));

    /// Web Mercator projection on a WGS84 ellipsoid, used natively by most
    /// web map engines.
    pub const EPSG3857: Crs = Crs(Cow::Borrowed("EPSG:3857"));

    /// Creates a reference system identifier from the given code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// The identifier code, e.g. `EPSG:4326`.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic coordinate pair in degrees.
///
/// A `LonLat` is always produced and consumed together with a [`Crs`] given
/// in the options of the operation (defaulting to [`Crs::WGS84`]). The value
/// itself does not carry the reference system.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LonLat {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LonLat {
    /// Creates a new coordinate pair.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Creates a new [`LonLat`] from longitude and latitude values (in degrees).
///
/// ```
/// use ortelius::lonlat;
///
/// let point = lonlat!(37.61, 55.75);
/// assert_eq!(point.lon, 37.61);
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        $crate::LonLat::new($lon, $lat)
    };
}
