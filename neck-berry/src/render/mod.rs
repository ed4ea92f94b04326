//! 诊断图的绘制与持久化存储, 主要用于调试.
//!
//! 诊断图由三个并排的面板组成, 每个面板为 X 行 Z 列,
//! 矢状索引 0 位于底部, 轴向索引从左向右增长:
//!
//! 1. 冠状投影, 并在颈部索引处画一条竖线;
//! 2. 组织掩膜, 叠加原始覆盖曲线, 平滑覆盖曲线和颈部竖线;
//! 3. 切割后体积的冠状中心切片.

use crate::consts::{gray::*, rgb, PANEL_GAP};
use crate::data::IntensityWindow;
use crate::pipeline::NeckCut;
use image::{ImageResult, Rgb, RgbImage};
use ndarray::{ArrayView2, Axis};
use num::ToPrimitive;
use std::path::Path;

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        mod plot;

        pub use plot::ImgDisplay;
    }
}

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径. 格式由扩展名决定.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 三面板诊断图.
#[derive(Clone, Debug)]
pub struct Figure {
    image: RgbImage,
    panel_width: u32,
}

impl Figure {
    /// 从一次完整流程的结果绘制诊断图.
    pub fn from_cut<A: ToPrimitive>(cut: &NeckCut<A>) -> Figure {
        let profile = &cut.profile;
        let (x, y, z) = cut.shape();
        let (width, height) = (z as u32, x as u32);

        let mut image = RgbImage::from_pixel(
            3 * width + 2 * PANEL_GAP,
            height,
            Rgb([DARK_GRAY; 3]),
        );
        let mut first = Panel::new(&mut image, 0, width, height);
        first.draw_gray(profile.projection.view());
        first.draw_vertical(profile.neck_index, rgb::NECK_LINE);

        let mut second = Panel::new(&mut image, 1, width, height);
        second.draw_mask(profile.mask.view());
        second.draw_curve(profile.coverage.iter().map(|&c| c as f64), rgb::COVERAGE);
        second.draw_curve(profile.smoothed.iter().copied(), rgb::SMOOTHED);
        second.draw_vertical(profile.neck_index, rgb::NECK_LINE);

        let center = cut
            .volume
            .index_axis(Axis(1), y / 2)
            .map(|v| v.to_f64().unwrap_or(f64::NAN));
        Panel::new(&mut image, 2, width, height).draw_gray(center.view());

        Figure {
            image,
            panel_width: width,
        }
    }

    /// 单个面板宽度 (即 Z).
    #[inline]
    pub fn panel_width(&self) -> u32 {
        self.panel_width
    }

    /// 获得底层图像.
    #[inline]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// 消费自我, 获得底层图像.
    #[inline]
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl ImgWriteVis for Figure {
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.image.save(path)
    }
}

/// 诊断图中的一个面板. (h, w) 数组坐标 -> (left + w, height - 1 - h) 像素坐标.
struct Panel<'a> {
    image: &'a mut RgbImage,
    left: u32,
    width: u32,
    height: u32,
}

impl<'a> Panel<'a> {
    /// 第 `index` 个面板 (从 0 开始).
    #[inline]
    fn new(image: &'a mut RgbImage, index: u32, width: u32, height: u32) -> Self {
        Self {
            image,
            left: index * (width + PANEL_GAP),
            width,
            height,
        }
    }

    #[inline]
    fn put(&mut self, col: u32, row: u32, color: [u8; 3]) {
        if col < self.width && row < self.height {
            self.image
                .put_pixel(self.left + col, self.height - 1 - row, Rgb(color));
        }
    }

    /// 按 `data` 的有限值范围做窗口映射. 非有限值画为黑色.
    fn draw_gray(&mut self, data: ArrayView2<f64>) {
        let window = IntensityWindow::fit(data.iter());
        for ((h, w), &v) in data.indexed_iter() {
            let g = window.and_then(|win| win.eval(v)).unwrap_or(BLACK);
            self.put(w as u32, h as u32, [g; 3]);
        }
    }

    fn draw_mask(&mut self, mask: ArrayView2<bool>) {
        for ((h, w), &b) in mask.indexed_iter() {
            let g = if b { WHITE } else { BLACK };
            self.put(w as u32, h as u32, [g; 3]);
        }
    }

    fn draw_vertical(&mut self, col: usize, color: [u8; 3]) {
        for row in 0..self.height {
            self.put(col as u32, row, color);
        }
    }

    /// 以 "索引 -> 值" 的方式画折线, 值即为行号. 相邻点之间以竖直线段相连.
    fn draw_curve<I: IntoIterator<Item = f64>>(&mut self, values: I, color: [u8; 3]) {
        let top = self.height.saturating_sub(1) as f64;
        let rows: Vec<u32> = values
            .into_iter()
            .map(|v| v.round().clamp(0.0, top) as u32)
            .collect();
        for (col, &row) in rows.iter().enumerate() {
            let next = rows.get(col + 1).copied().unwrap_or(row);
            for r in row.min(next)..=row.max(next) {
                self.put(col as u32, r, color);
            }
        }
    }
}
