//! 颈部定位流程的运行时错误.

use thiserror::Error;

/// 颈部定位/切割的运行时错误.
///
/// 文件读写错误不在此列, 它们以 `nifti::NiftiError` 等原始类型返回.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NeckError {
    /// 输入不是三轴 (矢状, 冠状, 轴向) 数组, 或某一轴长度为 0.
    #[error("unsupported volume shape {shape:?}: expected 3 non-empty axes (sagittal, coronal, axial)")]
    InvalidVolumeShape {
        /// 实际形状.
        shape: Vec<usize>,
    },

    /// 平滑窗口为 0 或大于覆盖曲线长度.
    #[error("smoothing window {window} is outside 1..={len}")]
    InvalidWindow {
        /// 请求的窗口宽度.
        window: usize,

        /// 覆盖曲线长度.
        len: usize,
    },

    /// 平滑曲线上没有严格的内部局部极小值.
    #[error("smoothed coverage profile of length {len} has no strict interior local minimum")]
    NoMinimumFound {
        /// 平滑曲线长度.
        len: usize,
    },
}

/// 颈部定位流程运行时结果.
pub type NeckResult<T> = Result<T, NeckError>;
