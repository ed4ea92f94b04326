//! 冠状方向平均投影.

use crate::error::{NeckError, NeckResult};
use ndarray::{Array2, ArrayBase, ArrayView2, ArrayView3, ArrayViewMut1, Axis, Data, Dimension, Ix3};
use num::ToPrimitive;

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
    }
}

/// 冠状投影 (X, Z).
pub type Projection = Array2<f64>;

/// 将任意维数的数组视图检查并转换为三维视图 (X, Y, Z).
///
/// 维数不是 3, 或任一轴长度为 0 时返回 `InvalidVolumeShape`.
pub(crate) fn as_volume<A, S, D>(volume: &ArrayBase<S, D>) -> NeckResult<ArrayView3<'_, A>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    let invalid = || NeckError::InvalidVolumeShape {
        shape: volume.shape().to_vec(),
    };
    let view = volume.view().into_dimensionality::<Ix3>().map_err(|_| invalid())?;
    if view.is_empty() {
        return Err(invalid());
    }
    Ok(view)
}

/// 沿冠状轴 (第 1 轴) 求平均, 获得 (矢状, 轴向) 二维投影.
///
/// 体素值以 `f64` 累加. 无法表示为 `f64` 的体素按 `NaN` 处理.
pub fn coronal_projection<A, S, D>(volume: &ArrayBase<S, D>) -> NeckResult<Projection>
where
    A: ToPrimitive + Sync,
    S: Data<Elem = A>,
    D: Dimension,
{
    let volume = as_volume(volume)?;
    let (x, _, z) = volume.dim();
    let mut out = Projection::zeros((x, z));

    #[cfg(feature = "rayon")]
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(volume.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(row, plane)| mean_plane(plane, row));

    #[cfg(not(feature = "rayon"))]
    out.axis_iter_mut(Axis(0))
        .zip(volume.axis_iter(Axis(0)))
        .for_each(|(row, plane)| mean_plane(plane, row));

    log::debug!("coronal projection: {:?} -> {:?}", volume.shape(), out.shape());
    Ok(out)
}

/// `plane` 为固定矢状位置的 (Y, Z) 平面, 将每一列的均值写入 `row`.
fn mean_plane<A: ToPrimitive>(plane: ArrayView2<A>, mut row: ArrayViewMut1<f64>) {
    let len_y = plane.len_of(Axis(0)) as f64;
    for (slot, lane) in row.iter_mut().zip(plane.axis_iter(Axis(1))) {
        *slot = lane.iter().map(voxel_f64).sum::<f64>() / len_y;
    }
}

#[inline]
fn voxel_f64<A: ToPrimitive>(v: &A) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array3, IxDyn};

    #[test]
    fn test_projection_is_coronal_mean() {
        // v[x, y, z] = x + 10 * y + 100 * z
        let v = Array3::from_shape_fn((2, 3, 4), |(x, y, z)| (x + 10 * y + 100 * z) as i16);
        let p = coronal_projection(&v).unwrap();
        assert_eq!(p.dim(), (2, 4));
        for ((x, z), &m) in p.indexed_iter() {
            // y 的均值为 1.
            assert_eq!(m, (x + 10 + 100 * z) as f64);
        }
    }

    #[test]
    fn test_projection_rejects_bad_shape() {
        let flat = Array::<f32, _>::zeros((4, 4));
        assert_eq!(
            coronal_projection(&flat),
            Err(NeckError::InvalidVolumeShape { shape: vec![4, 4] })
        );

        let four = Array::<f32, _>::zeros(IxDyn(&[2, 2, 2, 2]));
        assert!(matches!(
            coronal_projection(&four),
            Err(NeckError::InvalidVolumeShape { .. })
        ));

        let empty = Array3::<f32>::zeros((3, 0, 5));
        assert!(matches!(
            coronal_projection(&empty),
            Err(NeckError::InvalidVolumeShape { .. })
        ));
    }

    #[test]
    fn test_projection_dyn_3d_accepted() {
        let v = Array::<u8, _>::from_elem(IxDyn(&[2, 5, 3]), 7);
        let p = coronal_projection(&v).unwrap();
        assert_eq!(p.dim(), (2, 3));
        assert!(p.iter().all(|&m| m == 7.0));
    }
}
