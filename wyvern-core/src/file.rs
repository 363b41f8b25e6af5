use std::{io, path::Path};

/// Write `content` to `path`, creating parent directories and overwriting any
/// existing file.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
