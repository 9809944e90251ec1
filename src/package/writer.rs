//! ZIP archive output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Datelike, Timelike, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

use super::DocumentPackage;

/// Write a package to a `.docx` file at `path`.
///
/// The archive is finished, flushed and synced before this returns. If any
/// step fails the partially written file is removed and the cause is
/// reported as [`Error::PackageWrite`].
///
/// # Example
///
/// ```no_run
/// use docxgen::package::{write_archive, DocumentPackage};
///
/// # fn package() -> DocumentPackage { DocumentPackage::new() }
/// write_archive(&package(), "report.docx")?;
/// # Ok::<(), docxgen::Error>(())
/// ```
pub fn write_archive(package: &DocumentPackage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let options = entry_options(package)?;

    let file = File::create(path).map_err(|e| Error::package_write(path, e))?;
    let result = write_entries(package, BufWriter::new(file), options).and_then(|writer| {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    });

    if let Err(source) = result {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial archive {}: {}", path.display(), e);
        } else {
            log::warn!("Removed partial archive {}", path.display());
        }
        return Err(Error::package_write(path, source));
    }

    log::info!("Wrote {} parts to {}", package.len(), path.display());
    Ok(())
}

/// Write a package to any seekable writer and return the writer.
///
/// Useful for building the archive in memory.
pub fn write_to_writer<W: Write + Seek>(package: &DocumentPackage, writer: W) -> Result<W> {
    let options = entry_options(package)?;
    Ok(write_entries(package, writer, options)?)
}

fn write_entries<W: Write + Seek>(
    package: &DocumentPackage,
    writer: W,
    options: SimpleFileOptions,
) -> io::Result<W> {
    let mut zip = ZipWriter::new(writer);

    for entry in package.entries() {
        log::debug!("Writing {} ({} bytes)", entry.path, entry.data.len());
        zip.start_file(entry.path.as_str(), options)
            .map_err(io::Error::other)?;
        zip.write_all(&entry.data)?;
    }

    let mut writer = zip.finish().map_err(io::Error::other)?;
    writer.flush()?;
    Ok(writer)
}

/// Options shared by every entry: deflate, a fixed timestamp and fixed
/// permissions, so identical packages produce identical bytes.
fn entry_options(package: &DocumentPackage) -> Result<SimpleFileOptions> {
    let modified = match package.modified() {
        Some(stamp) => zip_datetime(&stamp)?,
        None => zip::DateTime::default(),
    };

    Ok(SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(modified)
        .unix_permissions(0o644))
}

fn zip_datetime(stamp: &DateTime<Utc>) -> Result<zip::DateTime> {
    let out_of_range = || {
        Error::InvalidTimestamp(format!(
            "{} is outside the ZIP date range 1980-2107",
            stamp.to_rfc3339()
        ))
    };

    let year = u16::try_from(stamp.year()).map_err(|_| out_of_range())?;
    zip::DateTime::from_date_and_time(
        year,
        stamp.month() as u8,
        stamp.day() as u8,
        stamp.hour() as u8,
        stamp.minute() as u8,
        stamp.second() as u8,
    )
    .map_err(|_| out_of_range())
}
