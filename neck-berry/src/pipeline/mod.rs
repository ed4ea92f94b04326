//! 颈部定位与切割流程.
//!
//! 各阶段均为前一阶段输出的纯函数:
//!
//! 1. [`coronal_projection`]: (X, Y, Z) 体积沿冠状轴求平均, 得到 (X, Z) 投影;
//! 2. [`body_mask`]: 以投影全局均值为阈值得到组织掩膜;
//! 3. [`coverage_profile`]: 每个轴向切片上的组织列数;
//! 4. [`smooth_profile`]: 平顶核滑动平均;
//! 5. [`locate_neck`]: 最后一个严格局部极小值加偏移;
//! 6. [`cut_volume`]: 轴向索引小于颈部索引的体素置零.
//!
//! [`NeckTrim`] 串联以上阶段, 并把所有中间结果收集到 [`NeckCut`] 中,
//! 供可视化或导出模块使用.
//!
//! # 方向假设
//!
//! 流程假设轴向索引 0 位于颈部/足侧, 索引增大时朝向头顶.
//! 数据本身不会被检查或重定向.

mod coverage;
mod cut;
mod locate;
mod mask;
mod projection;
mod smooth;

pub use coverage::{coverage_profile, Coverage};
pub use cut::{cut_volume, cut_volume_in_place};
pub use locate::{local_minima, locate_neck};
pub use mask::{body_mask, BodyMask};
pub use projection::{coronal_projection, Projection};
pub use smooth::{smooth_profile, Smoothed};

use crate::consts::DEFAULT_WINDOW;
use crate::error::NeckResult;
use crate::Idx3d;
use ndarray::{Array3, ArrayBase, Data, Dimension};
use num::{ToPrimitive, Zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 颈部定位参数.
///
/// 该对象是只读的. 若要修改参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeckTrim {
    window: usize,
    offset: Option<usize>,
}

impl Default for NeckTrim {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl NeckTrim {
    /// 以平滑窗口宽度 `window` 构建. 偏移默认为 `window / 4`.
    ///
    /// `window` 的合法性在运行时检查 (必须在 `1..=Z` 内).
    #[inline]
    pub const fn new(window: usize) -> Self {
        Self {
            window,
            offset: None,
        }
    }

    /// 指定颈部偏移, 替代默认的 `window / 4`.
    #[inline]
    pub const fn with_offset(self, offset: usize) -> Self {
        Self {
            window: self.window,
            offset: Some(offset),
        }
    }

    /// 平滑窗口宽度.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// 颈部偏移 (向头部方向).
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(self.window / 4)
    }

    /// 运行投影到定位的所有阶段, 不切割体积.
    pub fn locate<A, S, D>(&self, volume: &ArrayBase<S, D>) -> NeckResult<NeckProfile>
    where
        A: ToPrimitive + Sync,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let projection = coronal_projection(volume)?;
        let mask = body_mask(projection.view());
        let coverage = coverage_profile(mask.view());
        let smoothed = smooth_profile(coverage.view(), self.window)?;

        let minima = local_minima(smoothed.view());
        let last = locate::select_last(&minima, smoothed.len())?;
        let neck_index = locate::clamp_index(last, self.offset(), coverage.len());
        log::debug!(
            "local minima {:?}, last {last}, offset {} => neck at {neck_index}",
            minima,
            self.offset()
        );

        Ok(NeckProfile {
            projection,
            mask,
            coverage,
            smoothed,
            minima,
            neck_index,
        })
    }

    /// 运行完整流程. 输入保持不变, 切割结果为新分配的数组.
    pub fn run<A, S, D>(&self, volume: &ArrayBase<S, D>) -> NeckResult<NeckCut<A>>
    where
        A: ToPrimitive + Clone + Zero + Sync,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let profile = self.locate(volume)?;
        let volume = projection::as_volume(volume)?;
        let volume = cut_volume(&volume, profile.neck_index);
        log::info!(
            "neck located at axial index {} of {}",
            profile.neck_index,
            profile.coverage.len()
        );
        Ok(NeckCut {
            trim: *self,
            profile,
            volume,
        })
    }
}

/// 定位阶段的全部中间结果.
///
/// 该结构完全透明, 用户可以直接读取各字段.
#[derive(Clone, Debug)]
pub struct NeckProfile {
    /// 冠状投影 (X, Z).
    pub projection: Projection,

    /// 组织掩膜 (X, Z).
    pub mask: BodyMask,

    /// 覆盖曲线, 长度 Z.
    pub coverage: Coverage,

    /// 平滑覆盖曲线, 长度 Z - 1.
    pub smoothed: Smoothed,

    /// 平滑曲线上的所有严格局部极小值.
    pub minima: Vec<usize>,

    /// 颈部切割索引.
    pub neck_index: usize,
}

/// 一次完整流程的结果: 中间结果与切割后的体积.
///
/// 可视化/导出模块只应读取该结构, 不应再调用流程内部.
#[derive(Clone, Debug)]
pub struct NeckCut<A> {
    /// 本次使用的参数.
    pub trim: NeckTrim,

    /// 定位阶段的中间结果.
    pub profile: NeckProfile,

    /// 切割后的体积 (X, Y, Z).
    pub volume: Array3<A>,
}

impl<A> NeckCut<A> {
    /// 颈部切割索引.
    #[inline]
    pub fn neck_index(&self) -> usize {
        self.profile.neck_index
    }

    /// 体积形状 (X, Y, Z).
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.volume.dim()
    }

    /// 消费自我, 获得切割后的体积.
    #[inline]
    pub fn into_volume(self) -> Array3<A> {
        self.volume
    }

    /// 生成结果摘要.
    pub fn report(&self) -> NeckReport {
        let (x, y, z) = self.shape();
        NeckReport {
            shape: [x, y, z],
            window: self.trim.window(),
            offset: self.trim.offset(),
            minima: self.profile.minima.clone(),
            neck_index: self.neck_index(),
            zeroed_slices: self.neck_index().min(z),
        }
    }
}

/// 结果摘要. 开启 `serde` feature 后可序列化.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeckReport {
    /// 体积形状 (X, Y, Z).
    pub shape: [usize; 3],

    /// 平滑窗口宽度.
    pub window: usize,

    /// 颈部偏移.
    pub offset: usize,

    /// 平滑曲线上的所有严格局部极小值.
    pub minima: Vec<usize>,

    /// 颈部切割索引.
    pub neck_index: usize,

    /// 被置零的轴向切片数.
    pub zeroed_slices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeckError;
    use ndarray::{Array3, Axis};

    /// (4, 3, 10) 合成头部: 第 z 层的前 `widths[z]` 个矢状列为 1, 其余为 0.
    fn tapered_head(widths: [usize; 10]) -> Array3<f32> {
        Array3::from_shape_fn((4, 3, 10), |(x, _, z)| if x < widths[z] { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_defaults() {
        let t = NeckTrim::default();
        assert_eq!(t.window(), 30);
        assert_eq!(t.offset(), 7);
        assert_eq!(NeckTrim::new(4).offset(), 1);
        assert_eq!(NeckTrim::new(4).with_offset(0).offset(), 0);
    }

    #[test]
    fn test_end_to_end_tapered_neck() {
        let v = tapered_head([4, 4, 4, 2, 1, 1, 2, 4, 4, 4]);
        let cut = NeckTrim::new(4).run(&v).unwrap();

        assert_eq!(cut.profile.coverage.to_vec(), vec![4, 4, 4, 2, 1, 1, 2, 4, 4, 4]);
        assert_eq!(cut.profile.minima, vec![2]);
        assert_eq!(cut.neck_index(), 3);

        assert_eq!(cut.volume.shape(), v.shape());
        for z in 0..10 {
            let got = cut.volume.index_axis(Axis(2), z);
            if z < 3 {
                assert!(got.iter().all(|&p| p == 0.0));
            } else {
                assert_eq!(got, v.index_axis(Axis(2), z));
            }
        }

        let r = cut.report();
        assert_eq!(r.shape, [4, 3, 10]);
        assert_eq!((r.window, r.offset, r.neck_index, r.zeroed_slices), (4, 1, 3, 3));
    }

    #[test]
    fn test_bright_dim_bright_band_is_a_plateau() {
        // 第 0-2 层与第 8-9 层为 1, 第 3-7 层为 0.
        let v = Array3::from_shape_fn((4, 4, 10), |(_, _, z)| {
            if z <= 2 || z >= 8 {
                1.0f32
            } else {
                0.0
            }
        });
        let trim = NeckTrim::new(4);
        let err = trim.locate(&v).unwrap_err();
        assert_eq!(err, NeckError::NoMinimumFound { len: 9 });

        // 覆盖曲线在 3-7 层很低, 平滑后最低处为平台.
        let p = coronal_projection(&v).unwrap();
        let c = coverage_profile(body_mask(p.view()).view());
        assert_eq!(c.to_vec(), vec![4, 4, 4, 0, 0, 0, 0, 0, 4, 4]);
        let s = smooth_profile(c.view(), 4).unwrap();
        assert_eq!(s.to_vec(), vec![2.0, 1.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_constant_volume_has_no_minimum() {
        let v = Array3::<i16>::from_elem((5, 5, 40), 100);
        assert_eq!(
            NeckTrim::default().run(&v).unwrap_err(),
            NeckError::NoMinimumFound { len: 39 }
        );
    }

    #[test]
    fn test_window_validation() {
        let v = tapered_head([4, 4, 4, 2, 1, 1, 2, 4, 4, 4]);
        assert_eq!(
            NeckTrim::new(0).run(&v).unwrap_err(),
            NeckError::InvalidWindow { window: 0, len: 10 }
        );
        assert_eq!(
            NeckTrim::new(11).run(&v).unwrap_err(),
            NeckError::InvalidWindow { window: 11, len: 10 }
        );
    }

    #[test]
    fn test_independent_scans_in_parallel() {
        use rayon::prelude::*;

        let heads: Vec<_> = (0..8)
            .map(|_| tapered_head([4, 4, 4, 2, 1, 1, 2, 4, 4, 4]))
            .collect();
        let necks: Vec<_> = heads
            .par_iter()
            .map(|v| NeckTrim::new(4).run(v).map(|c| c.neck_index()))
            .collect();
        assert!(necks.into_iter().all(|n| n == Ok(3)));
    }
}
