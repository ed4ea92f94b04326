//! 运行结果摘要.

use neck_berry::pipeline::NeckReport;
use std::io::{self, Write};
use std::path::Path;

const SEP: &str = "--------------------------------------------------------";

/// 将 `report` 以可读形式写进 `w` 中.
pub fn describe_into<W: Write>(name: &str, r: &NeckReport, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn minima_to_display(m: &[usize]) -> String {
        if m.is_empty() {
            "/".to_string()
        } else {
            m.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
        }
    }

    let [x, y, z] = r.shape;
    writeln!(w, "{SEP}")?;
    writeln!(w, "Scan `{name}`:")?;
    writeln!(w, "{S4}Shape (sagittal, coronal, axial): {x} x {y} x {z}")?;
    writeln!(w, "{S4}Smoothing window: {}", r.window)?;
    writeln!(w, "{S4}Neck offset: {}", r.offset)?;
    writeln!(w, "{S4}Local minima: {}", minima_to_display(&r.minima))?;
    writeln!(w, "{S4}Neck index: {}", r.neck_index)?;
    writeln!(w, "{S4}Zeroed axial slices: {} of {z}", r.zeroed_slices)?;
    write!(w, "{SEP}")?;
    Ok(())
}

/// 将 `report` 以 JSON 格式保存到 `path`.
pub fn save_json<P: AsRef<Path>>(r: &NeckReport, path: P) -> anyhow::Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut w = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, r)?;
    w.flush()?;
    Ok(())
}
