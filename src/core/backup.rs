use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !ask_overwrite(dest)? {
            info("Backup cancelled.");
            return Ok(());
        }

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        if compress {
            let compressed = compress_backup(dest)?;
            if compressed != dest.to_path_buf() {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                }
            }
        }

        Ok(())
    }
}

fn ask_overwrite(dest: &Path) -> AppResult<bool> {
    use std::io::{Write, stdin, stdout};

    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Overwrite? [y/N]: ");
    stdout().flush().ok();

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup into a .zip alongside the original path.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
