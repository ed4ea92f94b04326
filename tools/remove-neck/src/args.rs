//! 命令行参数.

use clap::Parser;
use neck_berry::consts::DEFAULT_WINDOW;
use std::path::PathBuf;

/// 从 3D 头部 nifti 扫描中裁掉颈部/肩部体素
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 颈部过长的输入扫描 (.nii / .nii.gz)
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// 输出文件路径
    #[arg(value_name = "OUTFILE", default_value = "no_neck.nii.gz")]
    pub outfile: PathBuf,

    /// 在窗口中展示诊断图 (需要 `plot` feature)
    #[arg(long, alias = "showplot")]
    pub show_plot: bool,

    /// 覆盖曲线的平滑窗口宽度 (体素数)
    #[arg(long, default_value_t = DEFAULT_WINDOW, value_name = "W")]
    pub window: usize,

    /// 颈部切割位置相对最后一个极小值向头部的偏移, 默认为 W / 4
    #[arg(long, value_name = "N")]
    pub offset: Option<usize>,

    /// 将诊断图保存为图片
    #[arg(long, value_name = "PNG")]
    pub plot: Option<PathBuf>,

    /// 将中间结果保存为 npz 归档
    #[arg(long, value_name = "NPZ")]
    pub dump: Option<PathBuf>,

    /// 将结果摘要保存为 JSON
    #[arg(long, value_name = "JSON")]
    pub report: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}
