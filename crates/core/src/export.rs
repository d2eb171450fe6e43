//! Shared export surface: the `--export` flag every exporting command
//! carries, and the writers behind it.
//!
//! Commands opt into one of two policies instead of redeclaring the flag
//! themselves; menu construction injects the shared sub-schema.

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

use crate::error::{Error, Result};
use crate::schema::{ArgumentSchema, FlagSpec};
use crate::table::Table;

/// Name of the injected flag.
pub const EXPORT_FLAG: &str = "export";

pub const EXPORT_CHOICES: [&str; 4] = ["none", "csv", "json", "xlsx"];

/// What a command produces besides its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPolicy {
    /// Raw data only: the fetched table can be exported.
    RawOnly,
    /// Raw data and a rendered figure; the figure is always produced when
    /// the session displays figures.
    RawAndFigures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    None,
    Csv,
    Json,
    Xlsx,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "" | "none" => Ok(Self::None),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(Error::UnknownExportFormat(other.to_string())),
        }
    }
}

/// Appends the shared `--export` flag to a command's schema.
///
/// # Errors
///
/// Fails only if the command already declares a flag named `export`, which
/// is a construction-time authoring mistake.
pub fn inject_flags(schema: ArgumentSchema, policy: ExportPolicy) -> Result<ArgumentSchema> {
    let help = match policy {
        ExportPolicy::RawOnly => "Export raw data into csv, json, xlsx",
        ExportPolicy::RawAndFigures => "Export raw data behind the figure into csv, json, xlsx",
    };
    schema.flag(FlagSpec::choice(
        EXPORT_FLAG,
        None,
        help,
        "none",
        &EXPORT_CHOICES,
    ))
}

/// Writes `table` to `<export_dir>/<tag>.<ext>` in the requested format.
///
/// A `none` format is a no-op. The xlsx format is accepted for interface
/// parity but not written; a warning is logged instead.
///
/// # Errors
///
/// Returns an error if the export directory cannot be created or the file
/// cannot be written or serialized.
pub fn export_table(
    table: &Table,
    export_dir: &str,
    tag: &str,
    format: ExportFormat,
) -> Result<Option<PathBuf>> {
    let extension = match format {
        ExportFormat::None => return Ok(None),
        ExportFormat::Xlsx => {
            warn!("xlsx export is not supported; `{tag}` data was not written");
            return Ok(None);
        }
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };

    let directory = PathBuf::from(shellexpand::tilde(export_dir).to_string());
    std::fs::create_dir_all(&directory)
        .map_err(|e| Error::io_error("export directory", &directory.display().to_string(), e))?;

    let path = directory.join(format!("{tag}.{extension}"));
    match format {
        ExportFormat::Csv => write_csv(table, &path)?,
        ExportFormat::Json => write_json(table, &path)?,
        _ => {}
    }

    Ok(Some(path))
}

fn write_csv(table: &Table, path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| {
        Error::io_error("csv export", &path.display().to_string(), e)
    })
}

fn write_json(table: &Table, path: &PathBuf) -> Result<()> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(row)
                .map(|(column, cell)| {
                    (column.clone(), serde_json::Value::String(cell.clone()))
                })
                .collect()
        })
        .collect();

    let file = File::create(path)
        .map_err(|e| Error::io_error("json export", &path.display().to_string(), e))?;
    serde_json::to_writer_pretty(file, &records)?;
    Ok(())
}
