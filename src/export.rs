//! CSV export of crawl results.
//!
//! One row per record; ingredients and directions are newline-joined
//! into single cells, so any cell containing a separator, quote or line
//! break gets RFC-4180 quoting.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::RecipeRecord;

/// Column order of the exported table.
pub const CSV_HEADER: [&str; 8] = [
    "title",
    "url",
    "ingredients",
    "directions",
    "prep_time",
    "cook_time",
    "servings",
    "image_url",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{escaped}\"")?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Write `records` as CSV, header row included.
pub fn write_csv<W: Write>(w: &mut W, records: &[RecipeRecord]) -> io::Result<()> {
    write_row(w, &CSV_HEADER)?;
    for record in records {
        let ingredients = record.ingredients.join("\n");
        let directions = record.directions.join("\n");
        write_row(
            w,
            &[
                record.title.as_str(),
                record.url.as_str(),
                ingredients.as_str(),
                directions.as_str(),
                record.prep_time.as_str(),
                record.cook_time.as_str(),
                record.servings.as_str(),
                record.image_url.as_str(),
            ],
        )?;
    }
    Ok(())
}

/// Write `records` to a CSV file at `path`.
pub fn save_csv<P: AsRef<Path>>(path: P, records: &[RecipeRecord]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_csv(&mut w, records)?;
    w.flush()
}
