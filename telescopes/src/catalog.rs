//! Telescope catalog: the read-only metadata every chart is drawn from.
//!
//! A catalog is loaded once at startup, either from the embedded default
//! (Euclid, JWST, HST and Rubin) or from a user supplied JSON file with the
//! same schema, and is never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::band::BandRange;
use crate::spec::{InstrumentSpec, SurveySpec, TelescopeSpec};

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/telescopes.json");

static BUILTIN_CATALOG: Lazy<TelescopeCatalog> = Lazy::new(|| {
    TelescopeCatalog::from_json(BUILTIN_CATALOG_JSON).expect("Embedded catalog should be valid")
});

/// Errors raised while loading or saving a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// A selection referenced a key that the catalog does not contain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown telescope '{0}'")]
    Telescope(String),

    #[error("Unknown instrument '{instrument}' on telescope '{telescope}'")]
    Instrument {
        telescope: String,
        instrument: String,
    },

    #[error("Unknown band '{band}' for {telescope} {instrument}")]
    Band {
        telescope: String,
        instrument: String,
        band: String,
    },

    #[error("Unknown survey '{survey}' for telescope '{telescope}'")]
    Survey { telescope: String, survey: String },

    #[error("Survey '{survey}' of {telescope} has no imaging for instrument '{instrument}'")]
    SurveyInstrument {
        telescope: String,
        survey: String,
        instrument: String,
    },
}

/// Ordered collection of telescope descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeCatalog {
    telescopes: Vec<TelescopeSpec>,
}

impl TelescopeCatalog {
    /// Build a catalog from telescope descriptions, validating every record
    pub fn new(telescopes: Vec<TelescopeSpec>) -> Result<Self, CatalogError> {
        let catalog = Self { telescopes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> &'static TelescopeCatalog {
        &BUILTIN_CATALOG
    }

    /// Parse and validate a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: TelescopeCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog with {} telescopes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Save the catalog as pretty printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.telescopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.telescopes.is_empty()
    }

    pub fn telescopes(&self) -> &[TelescopeSpec] {
        &self.telescopes
    }

    pub fn telescope_names(&self) -> impl Iterator<Item = &str> {
        self.telescopes.iter().map(|t| t.name.as_str())
    }

    pub fn telescope(&self, name: &str) -> Result<&TelescopeSpec, LookupError> {
        self.telescopes
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| LookupError::Telescope(name.to_string()))
    }

    pub fn instrument(
        &self,
        telescope: &str,
        instrument: &str,
    ) -> Result<&InstrumentSpec, LookupError> {
        self.telescope(telescope)?
            .instrument(instrument)
            .ok_or_else(|| LookupError::Instrument {
                telescope: telescope.to_string(),
                instrument: instrument.to_string(),
            })
    }

    pub fn band(
        &self,
        telescope: &str,
        instrument: &str,
        band: &str,
    ) -> Result<&BandRange, LookupError> {
        self.instrument(telescope, instrument)?
            .band(band)
            .ok_or_else(|| LookupError::Band {
                telescope: telescope.to_string(),
                instrument: instrument.to_string(),
                band: band.to_string(),
            })
    }

    pub fn survey(&self, telescope: &str, survey: &str) -> Result<&SurveySpec, LookupError> {
        self.telescope(telescope)?
            .survey(survey)
            .ok_or_else(|| LookupError::Survey {
                telescope: telescope.to_string(),
                survey: survey.to_string(),
            })
    }

    /// Pixel scale in arcseconds per pixel of an instrument within a survey
    pub fn pixel_scale(
        &self,
        telescope: &str,
        survey: &str,
        instrument: &str,
    ) -> Result<f64, LookupError> {
        self.survey(telescope, survey)?
            .instrument(instrument)
            .map(|inst| inst.pix_scale)
            .ok_or_else(|| LookupError::SurveyInstrument {
                telescope: telescope.to_string(),
                survey: survey.to_string(),
                instrument: instrument.to_string(),
            })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique("telescope", self.telescope_names())?;

        for telescope in &self.telescopes {
            let name = &telescope.name;

            if !(telescope.mirror.is_finite() && telescope.mirror > 0.0) {
                return Err(CatalogError::Invalid(format!(
                    "{name}: mirror diameter must be positive, got {}",
                    telescope.mirror
                )));
            }

            if telescope.instruments.is_empty() {
                return Err(CatalogError::Invalid(format!("{name}: no instruments")));
            }
            ensure_unique(&format!("{name} instrument"), telescope.instrument_names())?;

            for instrument in &telescope.instruments {
                if instrument.bands.is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "{name} {}: no bands",
                        instrument.name
                    )));
                }
                ensure_unique(
                    &format!("{name} {} band", instrument.name),
                    instrument.band_names(),
                )?;
            }

            ensure_unique(
                &format!("{name} survey"),
                telescope.surveys.iter().map(|s| s.name.as_str()),
            )?;

            for survey in &telescope.surveys {
                for inst in &survey.instruments {
                    if !(inst.pix_scale.is_finite() && inst.pix_scale > 0.0) {
                        return Err(CatalogError::Invalid(format!(
                            "{name} {} {}: pixel scale must be positive, got {}",
                            survey.name, inst.name, inst.pix_scale
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn ensure_unique<'a>(
    what: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(CatalogError::Invalid(format!("empty {what} name")));
        }
        if !seen.insert(name) {
            return Err(CatalogError::Invalid(format!("duplicate {what} '{name}'")));
        }
    }
    Ok(())
}
