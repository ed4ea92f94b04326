use ndarray::{Array1, ArrayView2, Axis};

/// 每个轴向切片上的组织列数, 长度为 Z.
pub type Coverage = Array1<usize>;

/// 沿矢状轴 (第 0 轴) 统计掩膜中 `true` 的个数.
///
/// 返回值长度等于掩膜列数, 每个值都在 `[0, X]` 内.
pub fn coverage_profile(mask: ArrayView2<bool>) -> Coverage {
    mask.axis_iter(Axis(1))
        .map(|column| column.iter().filter(|&&b| b).count())
        .collect()
}
