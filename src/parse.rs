// ============================================================================
// TEXT PARSING — free-form user text to validated numeric grids
// ============================================================================
//
// Parsing is kept entirely separate from the numeric engines so the
// filter/morphology test suites never depend on text formatting.

use crate::error::{Error, Result};
use crate::ops::convolve::Kernel;
use crate::ops::morphology::StructuringElement;

/// Parse exactly `n` numbers from comma- or semicolon-separated text.
/// Blank fragments are skipped; a wrong count or a non-numeric token is
/// `InvalidParameter`.
pub fn numbers(text: &str, n: usize) -> Result<Vec<f64>> {
    let normalized = text.replace(';', ",");
    let fields: Vec<&str> = normalized
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if fields.len() != n {
        return Err(Error::InvalidParameter(format!(
            "expected {n} numbers, got {}",
            fields.len()
        )));
    }
    fields
        .into_iter()
        .map(|f| {
            f.parse::<f64>()
                .map_err(|_| Error::InvalidParameter(format!("not a number: '{f}'")))
        })
        .collect()
}

/// Parse a rectangular float grid: rows on newlines or semicolons, cells
/// on whitespace or commas. Empty or ragged grids are `InvalidParameter`.
fn grid(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for line in text.split(['\n', ';']) {
        let cells: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|c| !c.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }
        let row = cells
            .into_iter()
            .map(|c| {
                c.parse::<f64>()
                    .map_err(|_| Error::InvalidParameter(format!("not a number: '{c}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(Error::InvalidParameter("empty grid".into()));
    }
    let width = rows[0].len();
    if rows.iter().any(|r| r.len() != width) {
        return Err(Error::InvalidParameter(
            "ragged grid: all rows must have the same length".into(),
        ));
    }
    Ok(rows)
}

/// Parse a convolution kernel from free-form text.
pub fn kernel(text: &str) -> Result<Kernel> {
    Kernel::new(grid(text)?)
}

/// Parse a structuring element from free-form text. Cells must be
/// -1 (background), 0 (don't care) or 1 (foreground).
pub fn structuring_element(text: &str) -> Result<StructuringElement> {
    let rows = grid(text)?;
    let cells = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| {
                    if v == -1.0 || v == 0.0 || v == 1.0 {
                        Ok(v as i8)
                    } else {
                        Err(Error::InvalidParameter(format!(
                            "structuring element cells must be -1, 0 or 1, got {v}"
                        )))
                    }
                })
                .collect::<Result<Vec<i8>>>()
        })
        .collect::<Result<Vec<Vec<i8>>>>()?;
    StructuringElement::new(cells)
}
