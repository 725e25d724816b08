//! Roster export.
//!
//! Two formats:
//! - CSV with the header `Day,Shift,Worker`, one row per filled slot in
//!   day order, then shift order.
//! - An xlsx workbook holding the week as a grid: days across, shifts
//!   down, member names in the cells.
//!
//! Each format has an observer that exports every generated roster.

use std::io;
use std::path::{Path, PathBuf};

use csv::Writer;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::events::{ScheduleEvent, ScheduleObserver};
use crate::models::{Roster, ShiftType};

/// CSV header row.
pub const CSV_HEADER: [&str; 3] = ["Day", "Shift", "Worker"];

/// Worksheet name of the xlsx export.
pub const XLSX_SHEET: &str = "Roster";

/// Writes a roster as CSV to any writer.
pub fn write_csv<W: io::Write>(roster: &Roster, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for (day, shift, member) in roster.assignments() {
        wtr.write_record([day, shift.as_str(), member])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a roster as CSV to a file, replacing it if present.
pub fn export_csv(roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(roster, file)?;
    tracing::info!(path = %path.display(), rows = roster.filled_count(), "roster exported");
    Ok(())
}

/// The week as rows of cells: a header row (`Shift`, then day labels),
/// then one row per shift type. Empty slots are empty strings.
pub fn week_grid(roster: &Roster) -> Vec<Vec<String>> {
    let mut grid = Vec::with_capacity(ShiftType::ALL.len() + 1);

    let mut header = vec!["Shift".to_string()];
    header.extend(roster.days.iter().map(|d| d.day.clone()));
    grid.push(header);

    for shift in ShiftType::ALL {
        let mut row = vec![shift.as_str().to_string()];
        row.extend(
            (0..roster.day_count())
                .map(|d| roster.member_at(d, shift).unwrap_or_default().to_string()),
        );
        grid.push(row);
    }
    grid
}

fn build_workbook(roster: &Roster) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let label = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET)?;

    for (row, cells) in week_grid(roster).iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let (row, col) = (row as u32, col as u16);
            if row == 0 || col == 0 {
                sheet.write_string_with_format(row, col, value, &label)?;
            } else {
                sheet.write_string(row, col, value)?;
            }
        }
    }
    Ok(workbook)
}

/// Renders a roster as an in-memory xlsx file.
pub fn write_xlsx(roster: &Roster) -> Result<Vec<u8>> {
    Ok(build_workbook(roster)?.save_to_buffer()?)
}

/// Writes a roster as an xlsx workbook, replacing the file if present.
pub fn export_xlsx(roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    build_workbook(roster)?.save(path)?;
    tracing::info!(path = %path.display(), days = roster.day_count(), "roster workbook exported");
    Ok(())
}

/// Exports every generated roster as CSV to a fixed path.
///
/// Export failures are logged and never reach the notifier.
#[derive(Debug, Clone)]
pub struct CsvExportObserver {
    path: PathBuf,
}

impl CsvExportObserver {
    /// Creates an observer writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleObserver for CsvExportObserver {
    fn on_event(&self, event: &ScheduleEvent<'_>) {
        if let ScheduleEvent::Generated(generated) = event {
            if let Err(err) = export_csv(&generated.roster, &self.path) {
                tracing::error!(path = %self.path.display(), error = %err, "csv export failed");
            }
        }
    }
}

/// Exports every generated roster as an xlsx week grid.
#[derive(Debug, Clone)]
pub struct XlsxExportObserver {
    path: PathBuf,
}

impl XlsxExportObserver {
    /// Creates an observer writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleObserver for XlsxExportObserver {
    fn on_event(&self, event: &ScheduleEvent<'_>) {
        if let ScheduleEvent::Generated(generated) = event {
            if let Err(err) = export_xlsx(&generated.roster, &self.path) {
                tracing::error!(path = %self.path.display(), error = %err, "xlsx export failed");
            }
        }
    }
}
