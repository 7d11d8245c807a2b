use std::path::Path;

/// Write an SVG string to disk.
pub fn write_svg(path: &Path, svg: &str) -> crate::Result<()> {
    std::fs::write(path, svg)?;
    Ok(())
}
