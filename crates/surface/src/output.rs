//! CSV, JSON and terminal output of decision surfaces.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use knnmap_knn::PNorm;

use crate::error::SurfaceError;
use crate::render::DecisionSurface;

/// Glyphs assigned to labels in sorted order, cycling when exhausted.
const GLYPHS: &[char] = &['#', 'o', '+', 'x', '*', '%', '@', '=', '~', '^'];

/// Glyph for cells without a winner.
const EMPTY_GLYPH: char = '?';

/// Writes one CSV row per cell: `x,y,label,proportion,tied`.
///
/// Cells without a winner get an empty label.
pub fn write_csv<L: Display, W: Write>(
    surface: &DecisionSurface<L>,
    writer: W,
) -> Result<(), SurfaceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["x", "y", "label", "proportion", "tied"])?;

    let grid = surface.grid();
    for (i, cell) in surface.cells().iter().enumerate() {
        let (ix, iy) = grid.position(i);
        let [x, y] = grid.coords(ix, iy);
        let label = cell.label().map(ToString::to_string).unwrap_or_default();
        wtr.write_record([
            x.to_string(),
            y.to_string(),
            label,
            cell.proportion().to_string(),
            cell.is_tied().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes [`write_csv`] output to a file, creating or truncating it.
pub fn write_csv_file<L: Display>(
    surface: &DecisionSurface<L>,
    path: &Path,
) -> Result<(), SurfaceError> {
    write_csv(surface, File::create(path)?)
}

#[derive(Serialize)]
struct SurfaceOutput<'a, L> {
    k: usize,
    requested_norm: PNorm,
    norm: PNorm,
    nx: usize,
    ny: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    n_tied: usize,
    n_warned: usize,
    label_counts: BTreeMap<String, usize>,
    cells: Vec<CellOutput<'a, L>>,
}

#[derive(Serialize)]
struct CellOutput<'a, L> {
    x: f64,
    y: f64,
    label: Option<&'a L>,
    proportion: f64,
    tied: bool,
}

/// Serializes a decision surface, with per-cell coordinates, to pretty JSON.
pub fn to_json<L>(surface: &DecisionSurface<L>) -> Result<String, SurfaceError>
where
    L: Serialize + Display + Ord,
{
    let grid = surface.grid();
    let cells = surface
        .cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let (ix, iy) = grid.position(i);
            let [x, y] = grid.coords(ix, iy);
            CellOutput {
                x,
                y,
                label: cell.label(),
                proportion: cell.proportion(),
                tied: cell.is_tied(),
            }
        })
        .collect();

    let output = SurfaceOutput {
        k: surface.k(),
        requested_norm: surface.requested_norm(),
        norm: surface.norm(),
        nx: grid.nx(),
        ny: grid.ny(),
        x_range: grid.x_range(),
        y_range: grid.y_range(),
        n_tied: surface.n_tied(),
        n_warned: surface.n_warned(),
        label_counts: surface
            .label_counts()
            .into_iter()
            .map(|(label, n)| (label.to_string(), n))
            .collect(),
        cells,
    };

    serde_json::to_string_pretty(&output).map_err(|e| SurfaceError::Serialization {
        reason: e.to_string(),
    })
}

/// Draws the surface as text, one glyph per cell, y increasing upward,
/// followed by a legend.
pub fn render_ascii<L: Display + Ord>(surface: &DecisionSurface<L>) -> String {
    let counts = surface.label_counts();
    let glyph_of: BTreeMap<&L, char> = counts
        .keys()
        .enumerate()
        .map(|(i, &label)| (label, GLYPHS[i % GLYPHS.len()]))
        .collect();

    let grid = surface.grid();
    let mut out = String::with_capacity((grid.nx() + 1) * grid.ny() + 64);
    for iy in (0..grid.ny()).rev() {
        for ix in 0..grid.nx() {
            let glyph = surface
                .label_at(ix, iy)
                .and_then(|label| glyph_of.get(label).copied())
                .unwrap_or(EMPTY_GLYPH);
            out.push(glyph);
        }
        out.push('\n');
    }
    for (label, n) in &counts {
        out.push_str(&format!("  {} = {label} ({n} cells)\n", glyph_of[label]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::render::render_surface;
    use knnmap_knn::{KnnConfig, LabeledDataset};

    fn split_surface() -> DecisionSurface<&'static str> {
        let ds =
            LabeledDataset::from_rows([[-1.0, 0.0], [1.0, 0.0]], vec!["left", "right"]).unwrap();
        let grid = GridSpec::new(-2.0, 2.0, 0.0, 1.0, 4, 2);
        render_surface(&ds, &grid, &KnnConfig::new(1)).unwrap()
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_csv(&split_surface(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "x,y,label,proportion,tied");
        assert_eq!(lines[1], "-2,0,left,1,false");
        assert_eq!(lines[8], "2,1,right,1,false");
    }

    #[test]
    fn test_ascii_layout() {
        let text = render_ascii(&split_surface());
        // "left" sorts first and gets the first glyph
        assert_eq!(text, "##oo\n##oo\n  # = left (4 cells)\n  o = right (4 cells)\n");
    }

    #[test]
    fn test_json_fields() {
        let json = to_json(&split_surface()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["k"], 1);
        assert_eq!(value["norm"], 2);
        assert_eq!(value["nx"], 4);
        assert_eq!(value["label_counts"]["left"], 4);
        assert_eq!(value["cells"].as_array().unwrap().len(), 8);
        assert_eq!(value["cells"][0]["label"], "left");
        assert_eq!(value["cells"][0]["x"], -2.0);
    }
}
