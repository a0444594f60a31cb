//! Filter band wavelength ranges

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a band range
#[derive(Debug, Error, PartialEq)]
pub enum BandRangeError {
    #[error("Wavelength range cannot contain non-finite values")]
    NonFinite,

    #[error("Invalid wavelength range: min must be less than max, got {0}..{1}")]
    NotAscending(f64, f64),
}

/// Wavelength bounds of one filter band
///
/// Serialized as a two element `[min, max]` array in nanometers. The shape of
/// the filter response is not modelled, only its extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct BandRange {
    /// Lower wavelength bound in nanometers
    min_nm: f64,

    /// Upper wavelength bound in nanometers
    max_nm: f64,
}

impl BandRange {
    /// Create a new band range from lower and upper bounds in nanometers
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is non-finite or if `min_nm >= max_nm`.
    pub fn new(min_nm: f64, max_nm: f64) -> Result<Self, BandRangeError> {
        if !min_nm.is_finite() || !max_nm.is_finite() {
            return Err(BandRangeError::NonFinite);
        }

        if min_nm >= max_nm {
            return Err(BandRangeError::NotAscending(min_nm, max_nm));
        }

        Ok(Self { min_nm, max_nm })
    }

    /// Lower wavelength bound in nanometers
    pub fn min_nm(&self) -> f64 {
        self.min_nm
    }

    /// Upper wavelength bound in nanometers
    pub fn max_nm(&self) -> f64 {
        self.max_nm
    }

    /// Width of the band in nanometers
    pub fn width_nm(&self) -> f64 {
        self.max_nm - self.min_nm
    }

    /// Midpoint of the band in nanometers
    pub fn center_nm(&self) -> f64 {
        (self.min_nm + self.max_nm) / 2.0
    }

    /// Whether a wavelength falls inside the band (inclusive)
    pub fn contains(&self, wavelength_nm: f64) -> bool {
        (self.min_nm..=self.max_nm).contains(&wavelength_nm)
    }
}

impl TryFrom<[f64; 2]> for BandRange {
    type Error = BandRangeError;

    fn try_from(bounds: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<BandRange> for [f64; 2] {
    fn from(range: BandRange) -> Self {
        [range.min_nm, range.max_nm]
    }
}
