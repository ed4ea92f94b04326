//! 覆盖曲线的滑动平均.

use crate::error::{NeckError, NeckResult};
use ndarray::{Array1, ArrayView1};

/// 平滑后的覆盖曲线, 长度为 Z - 1.
pub type Smoothed = Array1<f64>;

/// 用宽度为 `window` 的归一化平顶核对 `coverage` 做完整卷积,
/// 然后丢弃前 `window` 个输出.
///
/// 完整卷积共有 `n + window - 1` 个输出, 丢弃后剩余 `n - 1` 个, 且
///
/// `smoothed[i] = Σ coverage[k] / window`, `k ∈ [i + 1, i + window] ∩ [0, n)`.
///
/// 尾部的窗口越过曲线末端, 越界部分按 0 计入.
///
/// `window == 0` 或 `window > n` 时返回 `InvalidWindow`.
pub fn smooth_profile(coverage: ArrayView1<usize>, window: usize) -> NeckResult<Smoothed> {
    let n = coverage.len();
    if window == 0 || window > n {
        return Err(NeckError::InvalidWindow { window, len: n });
    }

    // prefix[i] = Σ coverage[..i]. 窗口和相等的位置, 结果逐位相同.
    let prefix: Vec<usize> = std::iter::once(0)
        .chain(coverage.iter().scan(0usize, |acc, &c| {
            *acc += c;
            Some(*acc)
        }))
        .collect();
    let denom = window as f64;
    let smoothed: Smoothed = (0..n - 1)
        .map(|i| {
            let hi = (i + window).min(n - 1);
            (prefix[hi + 1] - prefix[i + 1]) as f64 / denom
        })
        .collect();

    log::debug!(
        "smoothed coverage with window {window}: {} -> {} samples",
        n,
        smoothed.len()
    );
    Ok(smoothed)
}
