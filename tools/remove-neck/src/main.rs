//! 颈部裁剪命令行工具.
//!
//! 读取 nifti 头部扫描, 定位颈部并将其下方体素置零, 以输入的数据类型写出结果.
//! 定位失败时不写出任何体积文件, 并以非零状态码退出.

mod args;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use neck_berry::prelude::*;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let args = args::Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).env().init()?;
    log::debug!("{args:?}");

    let scan = HeadScan::open(&args.infile)
        .with_context(|| format!("cannot read {}", args.infile.display()))?;
    log::info!(
        "loaded {}: shape {:?}, voxel {:?} mm ({:.3} mm³)",
        args.infile.display(),
        scan.volume().shape(),
        scan.pix_dim(),
        scan.voxel()
    );

    let trim = match args.offset {
        Some(offset) => NeckTrim::new(args.window).with_offset(offset),
        None => NeckTrim::new(args.window),
    };
    let cut = trim
        .run(&scan.volume())
        .with_context(|| format!("cannot locate the neck in {}", args.infile.display()))?;

    scan.save_with(&cut.volume, &args.outfile)
        .with_context(|| format!("cannot write {}", args.outfile.display()))?;
    log::info!("written {}", args.outfile.display());

    let summary = cut.report();
    let mut buf = Vec::with_capacity(512);
    report::describe_into(&args.infile.display().to_string(), &summary, &mut buf)?;
    println!("{}", String::from_utf8_lossy(&buf));

    if let Some(path) = &args.report {
        report::save_json(&summary, path)
            .with_context(|| format!("cannot write report {}", path.display()))?;
    }

    if let Some(path) = &args.dump {
        save_npz(&cut, path).with_context(|| format!("cannot write {}", path.display()))?;
    }

    if args.plot.is_none() && !args.show_plot {
        return Ok(());
    }

    let figure = Figure::from_cut(&cut);
    if let Some(path) = &args.plot {
        figure
            .save(path)
            .with_context(|| format!("cannot write figure {}", path.display()))?;
    }
    if args.show_plot {
        show(&figure)?;
    }

    Ok(())
}

#[cfg(feature = "plot")]
fn show(figure: &Figure) -> Result<()> {
    figure.show_and_wait()?;
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn show(_: &Figure) -> Result<()> {
    log::warn!("--show-plot needs the `plot` feature; use --plot <PNG> to save the figure instead");
    Ok(())
}
