//! 通用常量.

/// 单通道颜色.
pub mod gray {
    /// 单通道黑色.
    pub const BLACK: u8 = 0b_0000_0000;

    /// 单通道暗灰色.
    pub const DARK_GRAY: u8 = 0b_0100_0000;

    /// 单通道白色.
    pub const WHITE: u8 = 0b_1111_1111;
}

/// 诊断图使用的 RGB 颜色.
pub mod rgb {
    /// 颈部切割线.
    pub const NECK_LINE: [u8; 3] = [230, 40, 40];

    /// 原始覆盖曲线.
    pub const COVERAGE: [u8; 3] = [40, 120, 230];

    /// 平滑后覆盖曲线.
    pub const SMOOTHED: [u8; 3] = [250, 160, 20];
}

/// 平滑窗口默认宽度 (体素数).
///
/// 该值没有经过系统调参, 只是一个在常见 1mm 各向同性 T1 扫描上可用的经验值.
pub const DEFAULT_WINDOW: usize = 30;

/// 诊断图中相邻两个面板之间的间隔 (像素).
pub const PANEL_GAP: u32 = 4;

/// 体素/像素类型.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ElemType {
    /// 投影值不高于全局均值, 代表背景.
    Background,

    /// 投影值高于全局均值, 代表组织.
    Foreground,
}

impl ElemType {
    /// 根据投影值和阈值判断类型. 严格大于阈值才算前景.
    #[inline]
    pub fn classify(value: f64, threshold: f64) -> Self {
        if value > threshold {
            Self::Foreground
        } else {
            Self::Background
        }
    }

    /// 是否为前景.
    #[inline]
    pub fn is_foreground(&self) -> bool {
        matches!(self, Self::Foreground)
    }
}
