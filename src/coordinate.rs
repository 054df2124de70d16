//! Geographic coordinates and free-form coordinate string parsing.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Cannot parse coordinate '{0}': expected 'latitude, longitude'")]
    InvalidFormat(String),

    #[error("Cannot parse '{0}' as a coordinate component")]
    InvalidNumber(String),

    #[error("Latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use rainviz::LatLon;
///
/// let jakarta: LatLon = "-6.1754, 106.8272".parse().unwrap();
/// assert_eq!(jakarta.0, -6.1754); // Latitude
/// assert_eq!(jakarta.1, 106.8272); // Longitude
///
/// let with_hemispheres: LatLon = "6.1754 S, 106.8272 E".parse().unwrap();
/// assert_eq!(with_hemispheres, jakarta);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.0, self.1)
    }
}

/// Parses one coordinate component: a decimal number with an optional
/// degree symbol and an optional hemisphere suffix. `negative_hemisphere`
/// is the letter that flips the sign (S for latitude, W for longitude).
fn parse_component(
    raw: &str,
    positive_hemisphere: char,
    negative_hemisphere: char,
) -> Result<f64, CoordinateError> {
    let mut text = raw.trim();
    let mut sign = 1.0;

    if let Some(stripped) = strip_hemisphere(text, positive_hemisphere) {
        text = stripped;
    } else if let Some(stripped) = strip_hemisphere(text, negative_hemisphere) {
        text = stripped;
        sign = -1.0;
    }

    let text = text.trim().trim_end_matches('°').trim();
    let value: f64 = text
        .parse()
        .map_err(|_| CoordinateError::InvalidNumber(raw.trim().to_string()))?;
    Ok(sign * value)
}

/// Strips a trailing hemisphere letter (case-insensitive), if present.
fn strip_hemisphere(text: &str, hemisphere: char) -> Option<&str> {
    let last = text.chars().last()?;
    if last.eq_ignore_ascii_case(&hemisphere) {
        Some(&text[..text.len() - last.len_utf8()])
    } else {
        None
    }
}

impl FromStr for LatLon {
    type Err = CoordinateError;

    /// Parses a free-form coordinate string into latitude/longitude.
    ///
    /// Accepts decimal degree pairs separated by a comma or whitespace,
    /// with optional degree symbols and hemisphere suffixes:
    /// `"-6.2, 106.8"`, `"6.2 S, 106.8 E"`, `"-6.2° 106.8°"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = if s.contains(',') {
            s.split(',').collect()
        } else {
            s.split_whitespace().collect()
        };
        let [raw_lat, raw_lon] = parts.as_slice() else {
            return Err(CoordinateError::InvalidFormat(s.trim().to_string()));
        };

        let latitude = parse_component(raw_lat, 'N', 'S')?;
        let longitude = parse_component(raw_lon, 'E', 'W')?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }

        Ok(LatLon(latitude, longitude))
    }
}
