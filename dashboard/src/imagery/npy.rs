//! NumPy `.npy` galaxy cutouts

use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;

use super::ImageLoadError;

/// Read a 2D cutout stored as `float64` or `float32`
pub fn read_cutout(path: &Path) -> Result<Array2<f64>, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::MissingDataFile(path.to_path_buf()));
    }

    let open = || File::open(path).map_err(|e| ImageLoadError::Io(path.to_path_buf(), e));

    match Array2::<f64>::read_npy(open()?) {
        Ok(image) => Ok(image),
        Err(f64_err) => Array2::<f32>::read_npy(open()?)
            .map(|image| image.mapv(f64::from))
            .map_err(|_| ImageLoadError::Npy(path.to_path_buf(), f64_err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::WriteNpyExt;

    #[test]
    fn test_reads_f64_cutout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gal_JWST_NIRCam_CEERS.npy");

        let cutout = array![[0.0, 1.5], [2.5, 3.0], [4.0, 5.0]];
        cutout.write_npy(File::create(&path).unwrap()).unwrap();

        assert_eq!(read_cutout(&path).unwrap(), cutout);
    }

    #[test]
    fn test_reads_f32_cutout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gal_HST_ACS_COSMOS.npy");

        let cutout = array![[0.5f32, 1.0], [2.0, 4.0]];
        cutout.write_npy(File::create(&path).unwrap()).unwrap();

        let image = read_cutout(&path).unwrap();
        assert_eq!(image, array![[0.5, 1.0], [2.0, 4.0]]);
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gal_Rubin_LSSTCam_LSST.npy");
        assert!(matches!(
            read_cutout(&missing),
            Err(ImageLoadError::MissingDataFile(_))
        ));

        let broken = dir.path().join("broken.npy");
        std::fs::write(&broken, b"\x93NUMPY garbage").unwrap();
        assert!(matches!(read_cutout(&broken), Err(ImageLoadError::Npy(..))));
    }
}
