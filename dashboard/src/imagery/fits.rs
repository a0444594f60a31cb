//! FITS field images

use std::path::Path;

use fitsio::compat::fitsfile::FitsFile;
use fitsio::compat::images::ReadImage;
use log::debug;
use ndarray::Array2;

use super::ImageLoadError;

/// Read the first two-dimensional image HDU of a FITS file as `f64`
///
/// Rows are kept in file order, so row 0 is the first row stored in the file.
pub fn read_first_image(path: &Path) -> Result<Array2<f64>, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::MissingDataFile(path.to_path_buf()));
    }

    let fits_err = |e: &dyn std::fmt::Display| ImageLoadError::Fits(path.to_path_buf(), e.to_string());

    let fptr = FitsFile::open(path).map_err(|e| fits_err(&e))?;

    let mut hdu_idx = 0;
    while let Ok(hdu) = fptr.hdu(hdu_idx) {
        let naxis = hdu.read_key::<i64>(&fptr, "NAXIS").unwrap_or(0);

        if naxis == 2 {
            let naxis1 = hdu.read_key::<i64>(&fptr, "NAXIS1").unwrap_or(0) as usize;
            let naxis2 = hdu.read_key::<i64>(&fptr, "NAXIS2").unwrap_or(0) as usize;
            let data = f64::read_image(&fptr, &hdu).map_err(|e| fits_err(&e))?;

            debug!(
                "Read {}x{} image from HDU {} of {}",
                naxis1,
                naxis2,
                hdu_idx,
                path.display()
            );

            return Array2::from_shape_vec((naxis2, naxis1), data).map_err(|e| fits_err(&e));
        }

        hdu_idx += 1;
    }

    Err(ImageLoadError::NoImage(path.to_path_buf()))
}
