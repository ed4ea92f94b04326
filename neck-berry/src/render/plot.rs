//! 诊断图窗口展示, 主要用于调试.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use super::Figure;
use opencv::core::{Scalar, Size, Vec3b, CV_8UC3};
use opencv::highgui::{imshow, wait_key};
use opencv::prelude::{Mat, MatTrait, MatTraitConst};

/// 窗口标题.
const WINDOW_NAME: &str = "remove-neck";

/// 表明一个可以在窗口中可视化的对象.
pub trait ImgDisplay {
    /// 展示对象.
    fn show(&self) -> opencv::Result<()>;

    /// 同 `show()`, 但在之后自动等待一次用户按键输入.
    fn show_and_wait(&self) -> opencv::Result<i32> {
        self.show()?;
        wait_key(0)
    }
}

/// RGB 图像 -> BGR opencv 矩阵.
fn figure_to_opencv_mat(fig: &Figure) -> opencv::Result<Mat> {
    let image = fig.image();
    let (w, h) = image.dimensions();
    let mut mat = Mat::new_size_with_default(
        Size::new(w as i32, h as i32),
        CV_8UC3,
        Scalar::from(0),
    )?;

    for (x, y, pix) in image.enumerate_pixels() {
        let [r, g, b] = pix.0;
        *mat.at_2d_mut::<Vec3b>(y as i32, x as i32)? = Vec3b::from([b, g, r]);
    }
    Ok(mat)
}

/// 展示三面板诊断图.
impl ImgDisplay for Figure {
    fn show(&self) -> opencv::Result<()> {
        let mat = figure_to_opencv_mat(self)?;
        imshow(WINDOW_NAME, &mat)
    }
}
