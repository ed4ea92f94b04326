//! 颈部位置定位.
//!
//! 颈部被假设为头部再次变宽之前的最后一处收窄, 即平滑覆盖曲线上索引最大的严格局部极小值.

use crate::error::{NeckError, NeckResult};
use itertools::Itertools;
use ndarray::ArrayView1;

/// 收集所有严格局部极小值的索引, 按升序排列.
///
/// 索引 `i` 满足 `v[i] < v[i - 1]` 且 `v[i] < v[i + 1]` 时被收集.
/// 两端点永远不是候选, 平台 (相邻相等值) 也不算极小值.
pub fn local_minima(profile: ArrayView1<f64>) -> Vec<usize> {
    profile
        .iter()
        .tuple_windows()
        .enumerate()
        .filter_map(|(i, (prev, cur, next))| (cur < prev && cur < next).then_some(i + 1))
        .collect()
}

/// 在平滑曲线 `smoothed` 上定位颈部切割索引.
///
/// 选择最后一个严格局部极小值, 再向头部方向移动 `offset` 以补偿平滑带来的滞后,
/// 最后截断到 `[0, len_z - 1]`.
///
/// 没有任何严格局部极小值时返回 `NoMinimumFound`.
pub fn locate_neck(smoothed: ArrayView1<f64>, offset: usize, len_z: usize) -> NeckResult<usize> {
    let minima = local_minima(smoothed);
    let last = select_last(&minima, smoothed.len())?;
    Ok(clamp_index(last, offset, len_z))
}

/// 取最后一个极小值.
#[inline]
pub(crate) fn select_last(minima: &[usize], len: usize) -> NeckResult<usize> {
    minima
        .last()
        .copied()
        .ok_or(NeckError::NoMinimumFound { len })
}

/// `minimum + offset`, 截断到 `[0, len_z - 1]`.
#[inline]
pub(crate) fn clamp_index(minimum: usize, offset: usize, len_z: usize) -> usize {
    let index = minimum.saturating_add(offset);
    let upper = len_z.saturating_sub(1);
    if index > upper {
        log::debug!("neck index {index} clamped to {upper}");
    }
    index.min(upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_local_minima_strict_interior() {
        let v = array![5.0, 4.0, 3.0, 2.0, 3.0, 4.0, 3.0, 2.0, 3.0, 4.0];
        assert_eq!(local_minima(v.view()), vec![3, 7]);

        // 端点与平台都不算.
        let v = array![0.0, 1.0, 1.0, 0.5, 0.5, 2.0, 0.0];
        assert!(local_minima(v.view()).is_empty());
    }

    #[test]
    fn test_last_minimum_plus_offset() {
        let v = array![5.0, 4.0, 3.0, 2.0, 3.0, 4.0, 3.0, 2.0, 3.0, 4.0];
        // window = 4 => offset = 1.
        assert_eq!(locate_neck(v.view(), 4 / 4, 10), Ok(8));
    }

    #[test]
    fn test_offset_is_clamped() {
        let v = array![3.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0];
        assert_eq!(local_minima(v.view()), vec![1, 4, 8]);
        assert_eq!(locate_neck(v.view(), 3, 10), Ok(9));
        assert_eq!(locate_neck(v.view(), usize::MAX, 10), Ok(9));
    }

    #[test]
    fn test_no_minimum() {
        let flat = Array1::<f64>::zeros(12);
        assert_eq!(
            locate_neck(flat.view(), 7, 13),
            Err(NeckError::NoMinimumFound { len: 12 })
        );

        let rising = Array1::from_iter((0..9).map(f64::from));
        assert!(locate_neck(rising.view(), 0, 10).is_err());

        let short = array![1.0, 0.0];
        assert!(locate_neck(short.view(), 0, 3).is_err());
    }
}
