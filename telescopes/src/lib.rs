//! Static metadata for telescope comparison charts.
//!
//! Describes each telescope's display color, primary mirror, field of view,
//! instruments with their filter bands, and the surveys sample images come
//! from. Filter bands are described by their wavelength extent only; the
//! shapes drawn from them are illustrative, not photometric.

pub mod band;
pub mod catalog;
pub mod color;
pub mod spec;

pub use band::{BandRange, BandRangeError};
pub use catalog::{CatalogError, LookupError, TelescopeCatalog};
pub use color::{ColorParseError, TelescopeColor};
pub use spec::{
    FieldOfView, InstrumentSpec, LineStyle, NamedBand, SurveyInstrument, SurveySpec, TelescopeSpec,
};
