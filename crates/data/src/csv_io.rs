//! CSV reading and writing of labeled datasets.

use std::fmt::Display;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use knnmap_knn::LabeledDataset;

use crate::error::DataError;

/// Reads a labeled dataset from a CSV file on disk.
///
/// See [`read_dataset`] for the expected layout.
///
/// # Errors
///
/// Returns [`DataError::FileNotFound`] if `path` does not exist, plus any
/// error from [`read_dataset`].
pub fn read_dataset_csv(path: &Path) -> Result<LabeledDataset<String>, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let dataset = read_dataset(File::open(path)?)?;
    info!(
        path = %path.display(),
        n_points = dataset.len(),
        n_dims = dataset.n_dims(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Reads a labeled dataset from CSV with a header row.
///
/// The last column is the label; every other column is parsed as an `f64`
/// coordinate.
///
/// # Errors
///
/// [`DataError::TooFewColumns`] if the header has fewer than two columns,
/// [`DataError::ParseCoordinate`] for a non-numeric, NaN or infinite
/// coordinate,
/// [`DataError::Csv`] for malformed CSV (including rows of the wrong
/// length), and [`DataError::Dataset`] if there are no rows.
pub fn read_dataset<R: Read>(reader: R) -> Result<LabeledDataset<String>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(DataError::TooFewColumns {
            columns: headers.len(),
        });
    }
    let n_dims = headers.len() - 1;

    let mut points = Vec::new();
    let mut labels = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        for (j, field) in record.iter().take(n_dims).enumerate() {
            let value = field
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DataError::ParseCoordinate {
                    line,
                    column: headers[j].to_string(),
                    value: field.to_string(),
                })?;
            points.push(value);
        }
        labels.push(record[n_dims].trim().to_string());
    }

    Ok(LabeledDataset::from_flat(points, n_dims, labels)?)
}

/// Writes `dataset` to a CSV file, creating or truncating it.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be created, plus any
/// error from [`write_dataset`].
pub fn write_dataset_csv<L: Display>(
    dataset: &LabeledDataset<L>,
    path: &Path,
) -> Result<(), DataError> {
    write_dataset(dataset, File::create(path)?)?;
    info!(path = %path.display(), n_points = dataset.len(), "dataset written");
    Ok(())
}

/// Writes `dataset` as CSV with header `x0,…,x{d-1},label`.
///
/// # Errors
///
/// Returns [`DataError::Csv`] if writing fails.
pub fn write_dataset<L: Display, W: Write>(
    dataset: &LabeledDataset<L>,
    writer: W,
) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = (0..dataset.n_dims()).map(|j| format!("x{j}")).collect();
    header.push("label".to_string());
    wtr.write_record(&header)?;

    let mut row = Vec::with_capacity(dataset.n_dims() + 1);
    for (point, label) in dataset.iter() {
        row.clear();
        row.extend(point.iter().map(|x| x.to_string()));
        row.push(label.to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_basic() {
        let data = "x,y,class\n0.5,1.0,red\n-2,3e-1,blue\n";
        let ds = read_dataset(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.n_dims(), 2);
        assert_eq!(ds.point(1), &[-2.0, 0.3]);
        assert_eq!(ds.labels(), &["red", "blue"]);
    }

    #[test]
    fn test_read_trims_whitespace() {
        let data = "x,label\n 1.5 , a \n";
        let ds = read_dataset(data.as_bytes()).unwrap();
        assert_eq!(ds.point(0), &[1.5]);
        assert_eq!(ds.label(0), "a");
    }

    #[test]
    fn test_read_bad_number() {
        let data = "x,y,label\n1,2,a\n1,oops,b\n";
        let err = read_dataset(data.as_bytes()).unwrap_err();
        match err {
            DataError::ParseCoordinate {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "y");
                assert_eq!(value, "oops");
            }
            other => panic!("expected ParseCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rejects_non_finite() {
        for (data, bad) in [
            ("x,y,label\n0,1,a\nNaN,2,b\n", "NaN"),
            ("x,y,label\n0,inf,a\n", "inf"),
            ("x,y,label\n0,1,a\n-infinity,2,b\n", "-infinity"),
        ] {
            match read_dataset(data.as_bytes()) {
                Err(DataError::ParseCoordinate { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected ParseCoordinate for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_read_ragged_row_is_csv_error() {
        let data = "x,y,label\n1,2,a\n1,b\n";
        assert!(matches!(
            read_dataset(data.as_bytes()),
            Err(DataError::Csv { .. })
        ));
    }

    #[test]
    fn test_read_single_column() {
        assert!(matches!(
            read_dataset("label\na\n".as_bytes()),
            Err(DataError::TooFewColumns { columns: 1 })
        ));
    }

    #[test]
    fn test_read_header_only() {
        assert!(matches!(
            read_dataset("x,label\n".as_bytes()),
            Err(DataError::Dataset(knnmap_knn::KnnError::EmptyDataset))
        ));
    }

    #[test]
    fn test_write_layout() {
        let ds = LabeledDataset::from_rows([[0.5, -1.0], [2.0, 3.25]], vec!["red", "blue"]).unwrap();
        let mut buf = Vec::new();
        write_dataset(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "x0,x1,label\n0.5,-1,red\n2,3.25,blue\n");
    }
}
