use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use clap::ValueEnum;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ArchiveFormat {
    #[default]
    Zip,
    TarGz,
}

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally packing it into an
    /// archive. Returns the final path, or `None` when the user declined to
    /// overwrite an existing file.
    pub fn backup(
        pool: &DbPool,
        database: &str,
        dest_file: &str,
        compress: Option<ArchiveFormat>,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let archive = compress.map(|format| archive_path(dest, format));
        let target = archive.as_deref().unwrap_or(dest);

        if target.exists()
            && !ask_confirmation(&format!(
                "The file '{}' already exists. Overwrite it?",
                target.display()
            ))
        {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        let final_path = match (compress, archive) {
            (Some(format), Some(archive)) => {
                // the plain copy must not share its name with the archive
                let staged = archive == dest;
                let copy = if staged {
                    dest.with_extension("sqlite.tmp")
                } else {
                    dest.to_path_buf()
                };
                let entry = entry_name(if staged { src } else { dest })?;

                fs::copy(src, &copy)?;
                let packed = match format {
                    ArchiveFormat::Zip => compress_zip(&copy, &archive, &entry),
                    ArchiveFormat::TarGz => compress_tar_gz(&copy, &archive, &entry),
                };
                if let Err(e) = fs::remove_file(&copy) {
                    warning(format!("Failed to remove uncompressed backup: {e}"));
                }
                packed?;

                success(format!("Backup created: {}", archive.display()));
                archive
            }
            _ => {
                fs::copy(src, dest)?;
                success(format!("Backup created: {}", dest.display()));
                dest.to_path_buf()
            }
        };

        ttlog_quiet(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress.is_some() {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

fn archive_path(dest: &Path, format: ArchiveFormat) -> PathBuf {
    match format {
        ArchiveFormat::Zip => dest.with_extension("zip"),
        ArchiveFormat::TarGz => dest.with_extension("tar.gz"),
    }
}

fn entry_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Io(std::io::Error::other("backup path has no file name")))
}

fn compress_zip(source: &Path, zip_path: &Path, entry: &str) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(source)?;
    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));
    Ok(())
}

fn compress_tar_gz(source: &Path, tar_path: &Path, entry: &str) -> AppResult<()> {
    let file = fs::File::create(tar_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut tar = tar::Builder::new(encoder);

    tar.append_path_with_name(source, entry)?;
    tar.into_inner()?.finish()?;

    info(format!("Compressed: {}", tar_path.display()));
    Ok(())
}
