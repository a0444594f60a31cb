//! Telescope instrument comparison dashboard
//!
//! Draws one page of the dashboard per invocation and writes it as PNG or SVG,
//! depending on the `--output` extension.
//!
//! # Usage
//!
//! ```bash
//! # Band coverage, defaulting to Euclid's first instrument
//! cargo run --release --bin telescope_dashboard -- bands
//!
//! # Pick instruments and bands explicitly
//! cargo run --release --bin telescope_dashboard -- bands -s Euclid:NISP=Y,J -s JWST:NIRCam
//!
//! # Mirror and field of view comparisons (all telescopes if none given)
//! cargo run --release --bin telescope_dashboard -- mirrors -t HST -t JWST
//! cargo run --release --bin telescope_dashboard -- fov --output plots/fov.svg
//!
//! # Survey sample images read from --data-dir
//! cargo run --release --bin telescope_dashboard -- fields --survey HST:COSMOS
//! cargo run --release --bin telescope_dashboard -- galaxies --survey HST:CANDELS --survey Rubin:LSST --same-size
//!
//! # Inspect or export the catalog
//! cargo run --release --bin telescope_dashboard -- list
//! cargo run --release --bin telescope_dashboard -- dump-catalog --output my_telescopes.json
//! ```
//!
//! Set `RUST_LOG=debug` to see every band's row assignment.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dashboard::imagery::{field_gallery, galaxy_gallery, SampleGallery};
use dashboard::render::{BandsChart, FovChart, GalleryChart, MirrorsChart};
use dashboard::shared_args::SharedDashboardArgs;
use dashboard::{
    fov_scene, layout, mirror_scene, render_to_file, RenderChart, Selection, SelectionEntry,
    SurveyEntry, SurveySelection,
};
use log::info;
use telescopes::TelescopeCatalog;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    shared: SharedDashboardArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Band coverage of the selected instruments
    Bands {
        /// Entry in format TELESCOPE[:INSTRUMENT[=BAND,...]]; repeatable
        #[arg(short, long = "select")]
        select: Vec<SelectionEntry>,

        #[arg(short, long, default_value = "plots/bands.png")]
        output: PathBuf,
    },

    /// Primary mirror sizes next to a human
    Mirrors {
        /// Telescope to include; repeatable, all telescopes if omitted
        #[arg(short, long = "telescope")]
        telescopes: Vec<String>,

        #[arg(short, long, default_value = "plots/mirrors.png")]
        output: PathBuf,
    },

    /// Fields of view against the full Moon
    Fov {
        /// Telescope to include; repeatable, all telescopes if omitted
        #[arg(short, long = "telescope")]
        telescopes: Vec<String>,

        #[arg(short, long, default_value = "plots/fov.png")]
        output: PathBuf,
    },

    /// Sample field images from each survey
    Fields {
        /// Entry in format TELESCOPE:SURVEY[=INSTRUMENT,...]; repeatable
        #[arg(long = "survey", required = true)]
        surveys: Vec<SurveyEntry>,

        #[arg(short, long, default_value = "plots/fields.png")]
        output: PathBuf,
    },

    /// Sample galaxy cutouts from each survey
    Galaxies {
        /// Entry in format TELESCOPE:SURVEY[=INSTRUMENT,...]; repeatable
        #[arg(long = "survey", required = true)]
        surveys: Vec<SurveyEntry>,

        /// Pad cutouts so every galaxy is shown at the same angular scale
        #[arg(long, default_value_t = false)]
        same_size: bool,

        #[arg(short, long, default_value = "plots/galaxies.png")]
        output: PathBuf,
    },

    /// Print every telescope with its instruments, bands and surveys
    List,

    /// Write the active catalog as JSON, ready to edit and pass back with --catalog
    DumpCatalog {
        #[arg(short, long, default_value = "telescopes.json")]
        output: PathBuf,
    },
}

/// Telescopes named on the command line, or the whole catalog
fn telescopes_or_all(catalog: &TelescopeCatalog, telescopes: Vec<String>) -> Vec<String> {
    if telescopes.is_empty() {
        catalog.telescope_names().map(str::to_string).collect()
    } else {
        telescopes
    }
}

fn save_chart<C: RenderChart>(chart: &C, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    render_to_file(chart, output)?;
    println!("Plot saved to: {}", output.display());
    Ok(())
}

fn report_notices(gallery: &SampleGallery) {
    for notice in &gallery.notices {
        println!("{notice}");
    }
}

fn print_catalog(catalog: &TelescopeCatalog) {
    for telescope in catalog.telescopes() {
        println!(
            "{} (mirror {} m, field {} x {} arcmin, color {})",
            telescope.name,
            telescope.mirror,
            telescope.fov.x_arcmin(),
            telescope.fov.y_arcmin(),
            telescope.color
        );
        for instrument in &telescope.instruments {
            println!("  {} [{:?}]", instrument.name, instrument.line_style);
            for band in &instrument.bands {
                println!(
                    "    {:<8} {:>7.1} - {:>7.1} nm",
                    band.name,
                    band.min_max.min_nm(),
                    band.min_max.max_nm()
                );
            }
        }
        for survey in &telescope.surveys {
            let imaging: Vec<String> = survey
                .instruments
                .iter()
                .map(|i| format!("{} @ {}\"/px", i.name, i.pix_scale))
                .collect();
            println!("  survey {}: {}", survey.name, imaging.join(", "));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = cli.shared.load_catalog()?;
    let data_dir = &cli.shared.data_dir;

    match cli.command {
        Commands::Bands { select, output } => {
            let selection = Selection::from_entries(&catalog, &select)?;
            info!(
                "Laying out {} bands from {} instruments",
                selection.band_count(),
                selection.instrument_count()
            );
            let band_layout = layout(&catalog, &selection)?;
            save_chart(&BandsChart::new(&band_layout), &output)?;
        }

        Commands::Mirrors { telescopes, output } => {
            let telescopes = telescopes_or_all(&catalog, telescopes);
            let scene = mirror_scene(&catalog, &telescopes)?;
            save_chart(&MirrorsChart::new(&scene), &output)?;
        }

        Commands::Fov { telescopes, output } => {
            let telescopes = telescopes_or_all(&catalog, telescopes);
            let scene = fov_scene(&catalog, &telescopes)?;
            save_chart(&FovChart::new(&scene), &output)?;
        }

        Commands::Fields { surveys, output } => {
            let selection = SurveySelection::from_entries(&catalog, &surveys)?;
            let gallery = field_gallery(&selection, data_dir);
            report_notices(&gallery);
            save_chart(&GalleryChart::new(&gallery), &output)?;
        }

        Commands::Galaxies {
            surveys,
            same_size,
            output,
        } => {
            let selection = SurveySelection::from_entries(&catalog, &surveys)?;
            let gallery = galaxy_gallery(&catalog, &selection, data_dir, same_size)?;
            report_notices(&gallery);
            save_chart(&GalleryChart::new(&gallery), &output)?;
        }

        Commands::List => print_catalog(&catalog),

        Commands::DumpCatalog { output } => {
            catalog.save_to_file(&output)?;
            println!("Catalog saved to: {}", output.display());
        }
    }

    Ok(())
}
