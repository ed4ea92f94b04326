use crate::consts::ElemType;
use ndarray::{Array2, ArrayView2};

/// 组织存在掩膜 (X, Z). `true` 代表该位置大概率有组织.
pub type BodyMask = Array2<bool>;

/// 以投影的全局均值为阈值, 严格大于阈值的位置记为组织.
///
/// 常值投影中所有元素都等于均值, 因此结果全为 `false`. 该情况不做特殊处理,
/// 由后续的极小值搜索报告.
pub fn body_mask(projection: ArrayView2<f64>) -> BodyMask {
    let threshold = mean_of(projection);
    log::debug!("body mask threshold: {threshold:.4}");
    projection.mapv(|v| ElemType::classify(v, threshold).is_foreground())
}

/// 全局均值. 空数组返回 `NaN`, 此时任何比较均为 `false`.
#[inline]
fn mean_of(projection: ArrayView2<f64>) -> f64 {
    projection.sum() / projection.len() as f64
}
