/// 强度窗口, 包含窗位 (level) 和窗宽 (width).
///
/// 用于将任意量纲的体素强度 (MR 信号, 投影均值等) 转换为 8-bit 灰度值.
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug)]
pub struct IntensityWindow {
    level: f64,
    width: f64,
}

impl IntensityWindow {
    /// 构建强度窗.
    ///
    /// `level` 必须有限且 `width` 必须为正有限值, 否则返回 `None`.
    pub fn new(level: f64, width: f64) -> Option<IntensityWindow> {
        if level.is_finite() && width.is_finite() && width > 0.0 {
            Some(Self { level, width })
        } else {
            None
        }
    }

    /// 构建恰好覆盖 `[lower, upper]` 的窗口.
    ///
    /// 区间退化 (`lower == upper`) 时窗宽取 1, 使该值映射为中间灰度.
    pub fn from_bounds(lower: f64, upper: f64) -> Option<IntensityWindow> {
        if !(lower.is_finite() && upper.is_finite()) || lower > upper {
            return None;
        }
        if lower == upper {
            Self::new(lower, 1.0)
        } else {
            Self::new((lower + upper) / 2.0, upper - lower)
        }
    }

    /// 构建覆盖 `values` 中所有有限值的窗口. 没有有限值时返回 `None`.
    pub fn fit<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<IntensityWindow> {
        let (lo, hi) = values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        Self::from_bounds(lo, hi)
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.level - self.width / 2.0
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.level + self.width / 2.0
    }

    /// 窗位.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// 求在当前窗口设置下, 强度 `v` 对应的灰度图像素整数值 (0 <= value <= 255)
    ///
    /// 如果 `v` 无意义 (如 inf, NaN), 则返回 `None`.
    pub fn eval(&self, v: f64) -> Option<u8> {
        if !v.is_finite() {
            return None;
        }
        let lb = self.lower_bound();
        if v <= lb {
            Some(u8::MIN)
        } else if v >= self.upper_bound() {
            Some(u8::MAX)
        } else {
            // 255, not 256.
            Some((((v - lb) / self.width()) * 255.0) as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IntensityWindow;

    #[test]
    fn test_window_invalid_input() {
        assert!(IntensityWindow::new(0.0, -1.0).is_none());
        assert!(IntensityWindow::new(0.0, 0.0).is_none());
        assert!(IntensityWindow::new(f64::NAN, 1.0).is_none());
        assert!(IntensityWindow::from_bounds(2.0, 1.0).is_none());
        assert!(IntensityWindow::fit(&[f64::NAN, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_window_generic() {
        // [60, 100]
        let w = IntensityWindow::from_bounds(60.0, 100.0).unwrap();
        assert_eq!(w.level(), 80.0);
        assert_eq!(w.width(), 40.0);
        assert_eq!(w.eval(f64::NAN), None);
        assert_eq!(w.eval(f64::MIN), Some(0));
        assert_eq!(w.eval(f64::MAX), Some(255));

        assert_eq!(w.eval(60.0), Some(0));
        assert_eq!(w.eval(60.1), Some(0));
        assert_eq!(w.eval(70.0), Some((255.0 * 0.25) as u8));
        assert_eq!(w.eval(80.0), Some((255.0 * 0.5) as u8));
        assert_eq!(w.eval(99.999), Some(254));
        assert_eq!(w.eval(100.0), Some(u8::MAX));
    }

    #[test]
    fn test_window_fit() {
        let w = IntensityWindow::fit(&[3.0, f64::NAN, -1.0, 7.0]).unwrap();
        assert_eq!((w.lower_bound(), w.upper_bound()), (-1.0, 7.0));

        // 常值: 映射为中间灰度.
        let w = IntensityWindow::fit(&[5.0, 5.0]).unwrap();
        assert_eq!(w.eval(5.0), Some(127));
    }
}
