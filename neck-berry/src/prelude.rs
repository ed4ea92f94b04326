//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx3d;

pub use crate::consts::DEFAULT_WINDOW;
pub use crate::data::{HeadScan, IntensityWindow, NiftiHeaderAttr};
pub use crate::error::{NeckError, NeckResult};

pub use crate::pipeline::{NeckCut, NeckProfile, NeckReport, NeckTrim};

pub use crate::render::{Figure, ImgWriteVis};

#[cfg(feature = "plot")]
pub use crate::render::ImgDisplay;

pub use crate::dump::{save_npz, DumpError};
