//! 中间结果的 npz 导出.

use crate::pipeline::NeckCut;
use ndarray::arr0;
use ndarray_npy::{NpzWriter, WriteNpzError};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// 导出中间结果错误.
#[derive(Error, Debug)]
pub enum DumpError {
    /// 创建文件时的底层 I/O 错误.
    #[error("cannot create npz file: {0}")]
    Io(#[from] std::io::Error),

    /// 写入 npz 归档错误.
    #[error("cannot write npz archive: {0}")]
    Npz(#[from] WriteNpzError),
}

/// 将 `cut` 的中间结果写入 `path` 处的 npz 归档.
///
/// 归档包含: `projection` (f64, X×Z), `mask` (u8, X×Z), `coverage` (u64, Z),
/// `smoothed` (f64, Z - 1), `minima` (u64), `neck_index` (u64 标量).
/// 归档内文件名均带 `.npy` 后缀, 可直接由 `numpy.load` 读取.
pub fn save_npz<A, P: AsRef<Path>>(cut: &NeckCut<A>, path: P) -> Result<(), DumpError> {
    let p = &cut.profile;
    let mut npz = NpzWriter::new(File::create(path.as_ref())?);

    npz.add_array("projection.npy", &p.projection)?;
    npz.add_array("mask.npy", &p.mask.mapv(u8::from))?;
    npz.add_array("coverage.npy", &p.coverage.mapv(|c| c as u64))?;
    npz.add_array("smoothed.npy", &p.smoothed)?;
    let minima: ndarray::Array1<u64> = p.minima.iter().map(|&m| m as u64).collect();
    npz.add_array("minima.npy", &minima)?;
    npz.add_array("neck_index.npy", &arr0(p.neck_index as u64))?;
    npz.finish()?;

    log::debug!("intermediate arrays written to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NeckTrim;
    use ndarray::{Array0, Array1, Array2, Array3};
    use ndarray_npy::NpzReader;

    #[test]
    fn test_dump_contents() {
        let widths = [4, 4, 4, 2, 1, 1, 2, 4, 4, 4];
        let v = Array3::from_shape_fn((4, 3, 10), |(x, _, z)| if x < widths[z] { 1.0f32 } else { 0.0 });
        let cut = NeckTrim::new(4).run(&v).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neck.npz");
        save_npz(&cut, &path).unwrap();

        let mut npz = NpzReader::new(File::open(&path).unwrap()).unwrap();
        let mask: Array2<u8> = npz.by_name("mask.npy").unwrap();
        assert_eq!(mask, cut.profile.mask.mapv(u8::from));
        let coverage: Array1<u64> = npz.by_name("coverage.npy").unwrap();
        assert_eq!(coverage.to_vec(), vec![4, 4, 4, 2, 1, 1, 2, 4, 4, 4]);
        let smoothed: Array1<f64> = npz.by_name("smoothed.npy").unwrap();
        assert_eq!(smoothed, cut.profile.smoothed);
        let neck: Array0<u64> = npz.by_name("neck_index.npy").unwrap();
        assert_eq!(neck.into_scalar(), 3);
    }

    #[test]
    fn test_dump_bad_path() {
        let widths = [4, 4, 4, 2, 1, 1, 2, 4, 4, 4];
        let v = Array3::from_shape_fn((4, 3, 10), |(x, _, z)| if x < widths[z] { 1u8 } else { 0 });
        let cut = NeckTrim::new(4).run(&v).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("neck.npz");
        let err = save_npz(&cut, path).unwrap_err();
        assert!(matches!(err, DumpError::Io(_)));
        assert!(err.to_string().starts_with("cannot create npz file"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
