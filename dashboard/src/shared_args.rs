use clap::Args;
use log::{debug, info};
use std::path::{Path, PathBuf};
use telescopes::{CatalogError, TelescopeCatalog};

/// Default directory holding the sample FITS and NPY files
pub const DEFAULT_DATA_DIR: &str = "data";

/// Common arguments shared by every dashboard page
#[derive(Args, Debug, Clone)]
pub struct SharedDashboardArgs {
    /// JSON telescope catalog to use instead of the built-in one
    #[arg(long, global = true, env = "TELESCOPE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Directory containing the survey sample images
    #[arg(long, global = true, env = "TELESCOPE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

impl SharedDashboardArgs {
    /// Load the catalog named by `--catalog`, or the built-in catalog
    pub fn load_catalog(&self) -> Result<TelescopeCatalog, CatalogError> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => {
                info!("Using built-in telescope catalog");
                Ok(TelescopeCatalog::builtin().clone())
            }
        }
    }
}

/// Load a JSON telescope catalog, logging what was found
pub fn load_catalog(path: &Path) -> Result<TelescopeCatalog, CatalogError> {
    let catalog = TelescopeCatalog::load_from_file(path)?;
    debug!(
        "Catalog {} provides {} telescopes: {}",
        path.display(),
        catalog.len(),
        catalog.telescope_names().collect::<Vec<_>>().join(", ")
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        shared: SharedDashboardArgs,
    }

    #[test]
    fn test_defaults_use_builtin_catalog() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        if std::env::var_os("TELESCOPE_DATA_DIR").is_none() {
            assert_eq!(cli.shared.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        }
        if std::env::var_os("TELESCOPE_CATALOG").is_none() {
            let catalog = cli.shared.load_catalog().unwrap();
            assert_eq!(&catalog, TelescopeCatalog::builtin());
        }
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        TelescopeCatalog::builtin().save_to_file(&path).unwrap();

        let cli = TestCli::try_parse_from([
            "test",
            "--catalog",
            path.to_str().unwrap(),
            "--data-dir",
            "samples",
        ])
        .unwrap();

        assert_eq!(cli.shared.data_dir, PathBuf::from("samples"));
        let catalog = cli.shared.load_catalog().unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_catalog(&dir.path().join("nope.json")),
            Err(CatalogError::Io(_))
        ));
    }
}
