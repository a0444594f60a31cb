//! User selections of telescopes, instruments, bands and surveys.
//!
//! A selection is built fresh for every chart and thrown away once the chart
//! is drawn. Entries are written as `TELESCOPE[:INSTRUMENT[=BAND,BAND]]` for
//! the band chart and `TELESCOPE:SURVEY[=INSTRUMENT,INSTRUMENT]` for the
//! sample image pages.

use std::collections::HashMap;
use std::str::FromStr;

use telescopes::{LookupError, TelescopeCatalog};
use thiserror::Error;

/// Telescope shown when nothing was selected
pub const DEFAULT_TELESCOPE: &str = "Euclid";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error("Empty selection entry")]
    Empty,

    #[error("Empty {0} name in entry '{1}'")]
    EmptyName(&'static str, String),

    #[error("Survey entry '{0}' must be in format 'TELESCOPE:SURVEY[=INSTRUMENT,...]'")]
    MissingSurvey(String),
}

/// One `TELESCOPE[:INSTRUMENT[=BAND,...]]` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub telescope: String,
    pub instrument: Option<String>,
    pub bands: Option<Vec<String>>,
}

/// One `TELESCOPE:SURVEY[=INSTRUMENT,...]` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyEntry {
    pub telescope: String,
    pub survey: String,
    pub instruments: Option<Vec<String>>,
}

/// Split `HEAD:MIDDLE=A,B` into its parts, rejecting empty names
fn split_entry(
    s: &str,
    middle_kind: &'static str,
    list_kind: &'static str,
) -> Result<(String, Option<String>, Option<Vec<String>>), SelectionParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SelectionParseError::Empty);
    }

    let name = |kind: &'static str, part: &str| {
        let part = part.trim();
        if part.is_empty() {
            Err(SelectionParseError::EmptyName(kind, s.to_string()))
        } else {
            Ok(part.to_string())
        }
    };

    let Some((head, rest)) = s.split_once(':') else {
        return Ok((name("telescope", s)?, None, None));
    };

    let (middle, list) = match rest.split_once('=') {
        Some((middle, list)) => {
            let items = list
                .split(',')
                .map(|item| name(list_kind, item))
                .collect::<Result<Vec<_>, _>>()?;
            (middle, Some(items))
        }
        None => (rest, None),
    };

    Ok((name("telescope", head)?, Some(name(middle_kind, middle)?), list))
}

impl FromStr for SelectionEntry {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (telescope, instrument, bands) = split_entry(s, "instrument", "band")?;
        Ok(Self {
            telescope,
            instrument,
            bands,
        })
    }
}

impl FromStr for SurveyEntry {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (telescope, survey, instruments) = split_entry(s, "survey", "instrument")?;
        let survey = survey.ok_or_else(|| SelectionParseError::MissingSurvey(s.to_string()))?;
        Ok(Self {
            telescope,
            survey,
            instruments,
        })
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

/// Nested selection of telescopes, then instruments, then bands, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    telescopes: Vec<String>,
    instruments: HashMap<String, Vec<String>>,
    bands: HashMap<(String, String), Vec<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a telescope without any instruments
    pub fn with_telescope(mut self, telescope: &str) -> Self {
        push_unique(&mut self.telescopes, telescope);
        self
    }

    /// Add an instrument (and its telescope) without any bands
    pub fn with_instrument(mut self, telescope: &str, instrument: &str) -> Self {
        push_unique(&mut self.telescopes, telescope);
        push_unique(
            self.instruments.entry(telescope.to_string()).or_default(),
            instrument,
        );
        self
    }

    /// Add a band, along with its instrument and telescope
    pub fn with_band(self, telescope: &str, instrument: &str, band: &str) -> Self {
        let mut selection = self.with_instrument(telescope, instrument);
        push_unique(
            selection
                .bands
                .entry((telescope.to_string(), instrument.to_string()))
                .or_default(),
            band,
        );
        selection
    }

    /// Select the given telescopes with their first instrument and all of its bands
    pub fn with_defaults(
        catalog: &TelescopeCatalog,
        telescopes: &[&str],
    ) -> Result<Self, LookupError> {
        let entries: Vec<SelectionEntry> = telescopes
            .iter()
            .map(|&telescope| SelectionEntry {
                telescope: telescope.to_string(),
                instrument: None,
                bands: None,
            })
            .collect();
        Self::from_entries(catalog, &entries)
    }

    /// Build a selection from parsed entries, filling in defaults
    ///
    /// A telescope named without any instrument gets the catalog's first
    /// instrument; an instrument named without bands gets all of its bands.
    /// No entries at all selects [`DEFAULT_TELESCOPE`].
    pub fn from_entries(
        catalog: &TelescopeCatalog,
        entries: &[SelectionEntry],
    ) -> Result<Self, LookupError> {
        if entries.is_empty() {
            return Self::with_defaults(catalog, &[DEFAULT_TELESCOPE]);
        }

        let mut selection = Self::new();
        for entry in entries {
            let telescope = catalog.telescope(&entry.telescope)?;
            selection = selection.with_telescope(&telescope.name);

            let Some(instrument_name) = &entry.instrument else {
                continue;
            };
            let instrument = catalog.instrument(&telescope.name, instrument_name)?;
            selection = selection.with_instrument(&telescope.name, &instrument.name);

            let bands: Vec<&str> = match &entry.bands {
                Some(bands) => bands.iter().map(String::as_str).collect(),
                None => instrument.band_names().collect(),
            };
            for band in bands {
                catalog.band(&telescope.name, &instrument.name, band)?;
                selection = selection.with_band(&telescope.name, &instrument.name, band);
            }
        }

        let bare: Vec<String> = selection
            .telescopes
            .iter()
            .filter(|t| selection.instruments(t).is_empty())
            .cloned()
            .collect();
        for telescope_name in bare {
            let telescope = catalog.telescope(&telescope_name)?;
            if let Some(first) = telescope.instruments.first() {
                for band in first.band_names() {
                    selection = selection.with_band(&telescope.name, &first.name, band);
                }
            }
        }

        Ok(selection)
    }

    pub fn telescopes(&self) -> &[String] {
        &self.telescopes
    }

    /// Instruments selected for a telescope (empty if none)
    pub fn instruments(&self, telescope: &str) -> &[String] {
        self.instruments
            .get(telescope)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bands selected for an instrument (empty if none)
    pub fn bands(&self, telescope: &str, instrument: &str) -> &[String] {
        self.bands
            .get(&(telescope.to_string(), instrument.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.telescopes.is_empty()
    }

    /// Number of (telescope, instrument) entries
    pub fn instrument_count(&self) -> usize {
        self.telescopes
            .iter()
            .map(|t| self.instruments(t).len())
            .sum()
    }

    /// Number of (telescope, instrument, band) entries
    pub fn band_count(&self) -> usize {
        self.telescopes
            .iter()
            .flat_map(|t| self.instruments(t).iter().map(move |i| (t, i)))
            .map(|(t, i)| self.bands(t, i).len())
            .sum()
    }

    /// Check that every selected key exists in the catalog
    pub fn validate(&self, catalog: &TelescopeCatalog) -> Result<(), LookupError> {
        for telescope in &self.telescopes {
            catalog.telescope(telescope)?;
            for instrument in self.instruments(telescope) {
                catalog.instrument(telescope, instrument)?;
                for band in self.bands(telescope, instrument) {
                    catalog.band(telescope, instrument, band)?;
                }
            }
        }
        Ok(())
    }
}

/// Identifies one sample image: a telescope's instrument within a survey
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelKey {
    pub telescope: String,
    pub survey: String,
    pub instrument: String,
}

/// Ordered selection of survey imaging for the sample image pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveySelection {
    panels: Vec<PanelKey>,
}

impl SurveySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel(mut self, telescope: &str, survey: &str, instrument: &str) -> Self {
        let key = PanelKey {
            telescope: telescope.to_string(),
            survey: survey.to_string(),
            instrument: instrument.to_string(),
        };
        if !self.panels.contains(&key) {
            self.panels.push(key);
        }
        self
    }

    /// Build from parsed entries; a survey named without instruments gets all of them
    pub fn from_entries(
        catalog: &TelescopeCatalog,
        entries: &[SurveyEntry],
    ) -> Result<Self, LookupError> {
        let mut selection = Self::new();
        for entry in entries {
            let survey = catalog.survey(&entry.telescope, &entry.survey)?;
            let instruments: Vec<&str> = match &entry.instruments {
                Some(list) => list.iter().map(String::as_str).collect(),
                None => survey.instruments.iter().map(|i| i.name.as_str()).collect(),
            };
            for instrument in instruments {
                catalog.pixel_scale(&entry.telescope, &entry.survey, instrument)?;
                selection = selection.with_panel(&entry.telescope, &entry.survey, instrument);
            }
        }
        Ok(selection)
    }

    /// Panels in telescope, survey, instrument selection order
    pub fn panels(&self) -> &[PanelKey] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_entries() {
        let bare: SelectionEntry = "Euclid".parse().unwrap();
        assert_eq!(bare.telescope, "Euclid");
        assert_eq!(bare.instrument, None);
        assert_eq!(bare.bands, None);

        let instrument: SelectionEntry = "Euclid:NISP".parse().unwrap();
        assert_eq!(instrument.instrument.as_deref(), Some("NISP"));
        assert_eq!(instrument.bands, None);

        let bands: SelectionEntry = " Euclid : NISP = Y, J ".parse().unwrap();
        assert_eq!(bands.telescope, "Euclid");
        assert_eq!(bands.instrument.as_deref(), Some("NISP"));
        assert_eq!(bands.bands, Some(vec!["Y".to_string(), "J".to_string()]));
    }

    #[test]
    fn test_parse_rejects_empty_names() {
        assert_eq!("".parse::<SelectionEntry>(), Err(SelectionParseError::Empty));
        assert!(matches!(
            ":NISP".parse::<SelectionEntry>(),
            Err(SelectionParseError::EmptyName("telescope", _))
        ));
        assert!(matches!(
            "Euclid:NISP=Y,,J".parse::<SelectionEntry>(),
            Err(SelectionParseError::EmptyName("band", _))
        ));
    }

    #[test]
    fn test_parse_survey_entries() {
        let entry: SurveyEntry = "HST:CANDELS=ACS,WFC3".parse().unwrap();
        assert_eq!(entry.telescope, "HST");
        assert_eq!(entry.survey, "CANDELS");
        assert_eq!(
            entry.instruments,
            Some(vec!["ACS".to_string(), "WFC3".to_string()])
        );

        assert!(matches!(
            "HST".parse::<SurveyEntry>(),
            Err(SelectionParseError::MissingSurvey(_))
        ));
    }

    #[test]
    fn test_builder_keeps_order_and_deduplicates() {
        let selection = Selection::new()
            .with_band("JWST", "NIRCam", "F200W")
            .with_band("Euclid", "VIS", "VIS")
            .with_band("JWST", "NIRCam", "F090W")
            .with_band("JWST", "NIRCam", "F200W");

        assert_eq!(selection.telescopes(), ["JWST", "Euclid"]);
        assert_eq!(selection.bands("JWST", "NIRCam"), ["F200W", "F090W"]);
        assert_eq!(selection.instrument_count(), 2);
        assert_eq!(selection.band_count(), 3);
        assert!(selection.bands("HST", "ACS").is_empty());
    }

    #[test]
    fn test_empty_entries_select_default_telescope() {
        let catalog = TelescopeCatalog::builtin();
        let selection = Selection::from_entries(catalog, &[]).unwrap();

        assert_eq!(selection.telescopes(), [DEFAULT_TELESCOPE]);
        assert_eq!(selection.instruments("Euclid"), ["VIS"]);
        assert_eq!(selection.bands("Euclid", "VIS"), ["VIS"]);
    }

    #[test]
    fn test_instrument_without_bands_selects_all_bands() {
        let catalog = TelescopeCatalog::builtin();
        let entries = vec!["Euclid:NISP".parse().unwrap(), "HST".parse().unwrap()];
        let selection = Selection::from_entries(catalog, &entries).unwrap();

        assert_eq!(selection.telescopes(), ["Euclid", "HST"]);
        assert_eq!(selection.instruments("Euclid"), ["NISP"]);
        assert_eq!(selection.bands("Euclid", "NISP"), ["Y", "J", "H"]);
        assert_eq!(selection.instruments("HST"), ["ACS"]);
        assert_eq!(selection.bands("HST", "ACS"), ["F435W", "F606W", "F814W"]);
        assert!(selection.validate(catalog).is_ok());
    }

    #[test]
    fn test_unknown_keys_are_lookup_errors() {
        let catalog = TelescopeCatalog::builtin();

        let entries = vec!["Kepler".parse().unwrap()];
        assert_eq!(
            Selection::from_entries(catalog, &entries),
            Err(LookupError::Telescope("Kepler".to_string()))
        );

        let entries = vec!["Euclid:NISP=K".parse().unwrap()];
        assert!(matches!(
            Selection::from_entries(catalog, &entries),
            Err(LookupError::Band { .. })
        ));

        let invalid = Selection::new().with_band("Euclid", "VIS", "Y");
        assert!(invalid.validate(catalog).is_err());
    }

    #[test]
    fn test_survey_selection_from_entries() {
        let catalog = TelescopeCatalog::builtin();
        let entries = vec![
            "HST:CANDELS".parse().unwrap(),
            "Euclid:Wide=NISP".parse().unwrap(),
        ];
        let selection = SurveySelection::from_entries(catalog, &entries).unwrap();

        let titles: Vec<_> = selection
            .panels()
            .iter()
            .map(|p| format!("{} {} {}", p.telescope, p.survey, p.instrument))
            .collect();
        assert_eq!(
            titles,
            ["HST CANDELS ACS", "HST CANDELS WFC3", "Euclid Wide NISP"]
        );

        let missing = vec!["HST:COSMOS=WFC3".parse().unwrap()];
        assert!(matches!(
            SurveySelection::from_entries(catalog, &missing),
            Err(LookupError::SurveyInstrument { .. })
        ));
    }
}
