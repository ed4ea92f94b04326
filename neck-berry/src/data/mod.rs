use std::path::Path;

use ndarray::{Array3, ArrayBase, ArrayD, ArrayView3, ArrayViewD, ArrayViewMutD, Axis, Data, Dimension, Ix3, RemoveAxis};
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, NiftiType, ReaderOptions};

use crate::error::{NeckError, NeckResult};
use crate::Idx3d;

pub mod window;

pub use window::IntensityWindow;

/// `NiftiHeader` 是栈上大对象, 移动该对象的开销很可观.
/// 因此我们将其分配到堆上.
type BoxedHeader = Box<NiftiHeader>;

/// 手动拼接的 header 在 `intent_name` 中带有该标记.
const SYNTHETIC_INTENT: &[u8] = b"synthetic";

/// nifti-1 `dim` 字段为有符号 16 位整数, 单轴长度不能超过该值.
const MAX_DIM: usize = i16::MAX as usize;

/// nii 格式 3D 头部扫描, 包括 header 和体素强度. 强度以 `f32` 保存.
///
/// 体素按 nifti 原生轴序 (X, Y, Z) 即 (矢状, 冠状, 轴向) 存储, 不做任何重定向.
#[derive(Debug, Clone)]
pub struct HeadScan {
    header: BoxedHeader,
    data: ArrayD<f32>,
}

/// 从 header 读取 (X, Y, Z) 体素个数.
#[inline]
fn get_shape_from_header(h: &NiftiHeader) -> Idx3d {
    let [_, x, y, z, ..] = h.dim;
    (x as usize, y as usize, z as usize)
}

/// header 是否带有非恒等的线性缩放.
#[inline]
fn has_scaling(h: &NiftiHeader) -> bool {
    (h.scl_slope != 0.0 && h.scl_slope != 1.0) || h.scl_inter != 0.0
}

/// 3D nii 文件 header 的共用属性和部分通用操作.
pub trait NiftiHeaderAttr {
    /// 获取 header 部分.
    fn header(&self) -> &NiftiHeader;

    /// 获取数据形状大小 (X, Y, Z).
    #[inline]
    fn shape(&self) -> Idx3d {
        get_shape_from_header(self.header())
    }

    /// 获取轴向切片个数.
    #[inline]
    fn len_z(&self) -> usize {
        self.shape().2
    }

    /// 获取单个体素分辨率, 以毫米为单位, 按 (X, Y, Z) 排列.
    #[inline]
    fn pix_dim(&self) -> [f64; 3] {
        let [_, x, y, z, ..] = self.header().pixdim;
        [x as f64, y as f64, z as f64]
    }

    /// 体素分辨率在三个维度上是否是各向同的?
    #[inline]
    fn is_isotropic(&self) -> bool {
        let [x, y, z] = self.pix_dim();
        x == y && x == z
    }

    /// 获取体素的实际体积值, 以立方毫米为单位.
    #[inline]
    fn voxel(&self) -> f64 {
        self.pix_dim().iter().product()
    }
}

impl NiftiHeaderAttr for HeadScan {
    #[inline]
    fn header(&self) -> &NiftiHeader {
        &self.header
    }
}

impl HeadScan {
    /// 打开 nii / nii.gz 文件格式的 3D 扫描. `path` 为文件的本地路径.
    /// 如果打开成功, 则返回 `Ok(Self)`, 否则原样返回 `nifti` 的错误.
    ///
    /// header 中的 `scl_slope` / `scl_inter` 会在转换时被应用.
    /// 第三维之后长度为 1 的维度 (例如只有一个时间点的 4D 文件) 会被去掉,
    /// 其余维数不做检查, 由定位流程报告.
    pub fn open<P: AsRef<Path>>(path: P) -> nifti::Result<Self> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let header = Box::new(obj.header().clone());

        let mut data = obj.into_volume().into_ndarray::<f32>()?;
        while data.ndim() > 3 && data.shape().last() == Some(&1) {
            let last = data.ndim() - 1;
            data = data.index_axis_move(Axis(last), 0);
        }

        log::debug!(
            "opened {}: shape {:?}, datatype {:?}",
            path.as_ref().display(),
            data.shape(),
            header.data_type()
        );
        Ok(Self { header, data })
    }

    /// 根据裸数据和体素分辨率直接创建扫描. header 为 float32 类型,
    /// 并被标记为手动拼接 (见 `is_synthetic`).
    ///
    /// `data` 和 `pix_dim` 均按 (X, Y, Z) 排列.
    ///
    /// # 注意
    ///
    /// 该方法不会填写任何空间方向信息, 因此你应仅将其用于实验目的.
    ///
    /// 任一轴长度超过 nifti-1 上限 (32767) 时返回 `InvalidVolumeShape`.
    pub fn from_array(data: Array3<f32>, pix_dim: [f32; 3]) -> NeckResult<Self> {
        let mut header = NiftiHeader::default();
        let [_, px, py, pz, ..] = &mut header.pixdim;
        [*px, *py, *pz] = pix_dim;
        header.datatype = NiftiType::Float32 as i16;
        header.bitpix = 32;
        header.scl_slope = 1.0;
        header.scl_inter = 0.0;
        header.intent_name[..SYNTHETIC_INTENT.len()].copy_from_slice(SYNTHETIC_INTENT);
        Self::with_header(&header, data)
    }

    /// 以已有 `header` 和新数据创建扫描. header 中的维度信息会按 `data` 更新.
    ///
    /// 任一轴长度超过 nifti-1 上限 (32767) 时返回 `InvalidVolumeShape`.
    pub fn with_header(header: &NiftiHeader, data: Array3<f32>) -> NeckResult<Self> {
        let (x, y, z) = data.dim();
        if [x, y, z].iter().any(|&n| n > MAX_DIM) {
            return Err(NeckError::InvalidVolumeShape {
                shape: data.shape().to_vec(),
            });
        }

        let mut header = Box::new(header.clone());
        header.dim = [3, x as u16, y as u16, z as u16, 1, 1, 1, 1];
        Ok(Self {
            header,
            data: data.into_dyn(),
        })
    }

    /// 保留本扫描的 header, 替换体素数据. 用于把切割结果写回原始格式.
    #[inline]
    pub fn with_volume(&self, data: Array3<f32>) -> NeckResult<Self> {
        Self::with_header(&self.header, data)
    }

    /// 判断该结构是否是由 `from_array` 手动拼接的.
    pub fn is_synthetic(&self) -> bool {
        self.header.intent_name.starts_with(SYNTHETIC_INTENT)
    }

    /// 获得数据的一份不可变 shallow copy. 维数未经检查.
    #[inline]
    pub fn volume(&self) -> ArrayViewD<'_, f32> {
        self.data.view()
    }

    /// 获得数据的一份可变 shallow copy.
    #[inline]
    pub fn volume_mut(&mut self) -> ArrayViewMutD<'_, f32> {
        self.data.view_mut()
    }

    /// 以三维视图获取数据. 数据不是三维时返回 `None`.
    #[inline]
    pub fn volume_3d(&self) -> Option<ArrayView3<'_, f32>> {
        self.data.view().into_dimensionality::<Ix3>().ok()
    }

    /// 以本扫描的数据类型将自身保存到 `path`. 以 `.gz` 结尾时压缩存储.
    #[inline]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> nifti::Result<()> {
        self.save_with(&self.data, path)
    }

    /// 使用本扫描的 header 将 `data` 保存到 `path`.
    ///
    /// 输出的数据类型取自 header (`dtype_from = header`): 整数类型先四舍五入,
    /// 超出范围的值饱和截断. header 带有线性缩放或类型不受支持时以 float32 保存.
    /// 写出的 `scl_slope` / `scl_inter` 总是恒等缩放.
    pub fn save_with<S, D, P>(&self, data: &ArrayBase<S, D>, path: P) -> nifti::Result<()>
    where
        S: Data<Elem = f32>,
        D: Dimension + RemoveAxis,
        P: AsRef<Path>,
    {
        let mut header = self.header.as_ref().clone();
        let data_type = if has_scaling(&header) {
            NiftiType::Float32
        } else {
            header.data_type().unwrap_or(NiftiType::Float32)
        };
        header.scl_slope = 1.0;
        header.scl_inter = 0.0;

        log::debug!(
            "saving {:?} as {data_type:?} to {}",
            data.shape(),
            path.as_ref().display()
        );
        let writer = WriterOptions::new(path.as_ref()).reference_header(&header);
        match data_type {
            NiftiType::Uint8 => writer.write_nifti(&data.mapv(|v| v.round() as u8)),
            NiftiType::Int8 => writer.write_nifti(&data.mapv(|v| v.round() as i8)),
            NiftiType::Int16 => writer.write_nifti(&data.mapv(|v| v.round() as i16)),
            NiftiType::Uint16 => writer.write_nifti(&data.mapv(|v| v.round() as u16)),
            NiftiType::Int32 => writer.write_nifti(&data.mapv(|v| v.round() as i32)),
            NiftiType::Uint32 => writer.write_nifti(&data.mapv(|v| v.round() as u32)),
            NiftiType::Float64 => writer.write_nifti(&data.mapv(f64::from)),
            _ => writer.write_nifti(data),
        }
    }
}
