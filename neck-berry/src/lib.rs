#![warn(missing_docs)]

//! 核心库. 从 3D 头部扫描 (如结构像 T1 MR) 中定位颈部, 并将颈部/肩部体素置零,
//! 以免脑提取、配准等后续处理被头部以下的组织干扰.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 体素按 nifti 原生轴序 (X, Y, Z) 即 (矢状, 冠状, 轴向) 组织.
//! 2. 轴向索引 0 被假设为颈部/足侧, 索引增大朝向头顶. 该假设不会被验证,
//!   方向不同的扫描需要事先重定向.
//! 3. 该算法是粗略的启发式方法, 不是分割模型, 不对切割位置做解剖学验证.
//!
//! # 开发计划
//!
//! ### 颈部定位与切割 ✅
//!
//! 冠状投影 -> 组织掩膜 -> 覆盖曲线 -> 平顶核平滑 -> 最后一个局部极小值.
//!
//! 实现位于 `neck-berry/src/pipeline`.
//!
//! ### nifti 读写 ✅
//!
//! 读取时应用 header 的线性缩放, 写出时沿用输入 header 的数据类型.
//!
//! 实现位于 `neck-berry/src/data`.
//!
//! ### 诊断图 ✅
//!
//! 冠状投影, 掩膜与覆盖曲线, 切割结果中心切片三个面板.
//! PNG 存储总是可用, 窗口展示需要 `plot` feature.
//!
//! 实现位于 `neck-berry/src/render`.
//!
//! ### 中间结果导出 ✅
//!
//! 实现位于 `neck-berry/src/dump.rs`.
//!
//! ### 方向自动识别 ⌛️
//!
//! 利用 qform/sform 判断轴向正方向, 而不是假设索引 0 为颈部.

/// 三维索引, 按 (X, Y, Z) 排列.
pub type Idx3d = (usize, usize, usize);

/// 3D nii 文件基础数据结构.
mod data;

pub use data::{HeadScan, IntensityWindow, NiftiHeaderAttr};

pub mod consts;

pub mod dump;

mod error;

pub use error::{NeckError, NeckResult};

pub mod pipeline;

pub mod render;

pub mod prelude;
