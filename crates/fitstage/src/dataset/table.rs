use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{DatasetError, Result, Split};

/// Where a table was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub path: PathBuf,
    /// SHA-256 of the raw file bytes
    pub sha256: String,
}

/// Numeric table with named columns, rows are samples
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    data: Array2<f64>,
    source: Option<DataSource>,
}

impl Table {
    /// Create a table from column names and a row-major matrix
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(DatasetError::Shape(format!(
                "{} column names for {} data columns",
                columns.len(),
                data.ncols()
            )));
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DatasetError::DuplicateColumn {
                    source_name: "table".to_string(),
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            data,
            source: None,
        })
    }

    /// Load a comma-separated file with a header row.
    ///
    /// Every field must parse as a float; empty fields become NaN.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::from_csv_reader(bytes.as_slice(), &path.display().to_string())?;
        table.source = Some(DataSource {
            path: path.to_path_buf(),
            sha256: sha256::digest(bytes.as_slice()),
        });

        debug!(
            path = %path.display(),
            rows = table.n_rows(),
            cols = table.n_cols(),
            "loaded dataset"
        );
        Ok(table)
    }

    /// Parse CSV from any reader; `source_name` is used in error messages
    pub fn from_csv_reader<R: std::io::Read>(reader: R, source_name: &str) -> Result<Self> {
        let csv_error = |e: csv::Error| DatasetError::Csv {
            source_name: source_name.to_string(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if columns.is_empty() {
            return Err(DatasetError::Csv {
                source_name: source_name.to_string(),
                message: "missing header row".to_string(),
            });
        }

        let mut values = Vec::new();
        let mut n_rows = 0;
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            for (field, column) in record.iter().zip(&columns) {
                values.push(parse_field(field).ok_or_else(|| DatasetError::NonNumeric {
                    source_name: source_name.to_string(),
                    line,
                    column: column.clone(),
                    value: field.to_string(),
                })?);
            }
            n_rows += 1;
        }

        let data = Array2::from_shape_vec((n_rows, columns.len()), values)
            .map_err(|e| DatasetError::Shape(e.to_string()))?;

        Self::new(columns, data).map_err(|e| match e {
            DatasetError::DuplicateColumn { column, .. } => DatasetError::DuplicateColumn {
                source_name: source_name.to_string(),
                column,
            },
            other => other,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_index(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    /// Copy of one column
    pub fn column(&self, name: &str) -> Result<Array1<f64>> {
        let idx = self.require_index(name)?;
        Ok(self.data.column(idx).to_owned())
    }

    /// New table without the named column
    pub fn drop_column(&self, name: &str) -> Result<Table> {
        let idx = self.require_index(name)?;
        let keep: Vec<usize> = (0..self.n_cols()).filter(|&i| i != idx).collect();
        Ok(Table {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            data: self.data.select(Axis(1), &keep),
            source: self.source.clone(),
        })
    }

    /// Same data with columns in the given order; errors on unknown names
    pub fn select_columns(&self, names: &[String]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| self.require_index(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Table {
            columns: names.to_vec(),
            data: self.data.select(Axis(1), &indices),
            source: self.source.clone(),
        })
    }

    /// Features and target, see [`split_features_target`](super::split_features_target)
    pub fn split(&self, drop_col: &str) -> Result<Split> {
        super::split_features_target(self, drop_col)
    }
}

fn parse_field(field: &str) -> Option<f64> {
    if field.is_empty() {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const CSV: &str = "fixed acidity,alcohol,TARGET\n7.4,9.4,5\n7.8, 9.8 ,5\n11.2,9.8,6\n";

    fn table() -> Table {
        Table::from_csv_reader(CSV.as_bytes(), "wine.csv").unwrap()
    }

    #[test]
    fn test_parse_csv() {
        let t = table();
        assert_eq!(t.columns(), ["fixed acidity", "alcohol", "TARGET"]);
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 3);
        assert_eq!(t.data()[[1, 1]], 9.8);
        assert!(t.source().is_none());
    }

    #[test]
    fn test_column_and_drop() {
        let t = table();
        assert_eq!(t.column("TARGET").unwrap(), array![5.0, 5.0, 6.0]);

        let features = t.drop_column("TARGET").unwrap();
        assert_eq!(features.columns(), ["fixed acidity", "alcohol"]);
        assert_eq!(features.data(), array![[7.4, 9.4], [7.8, 9.8], [11.2, 9.8]]);
    }

    #[test]
    fn test_missing_column() {
        let t = table();
        match t.column("quality") {
            Err(DatasetError::MissingColumn { column, available }) => {
                assert_eq!(column, "quality");
                assert_eq!(available.len(), 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(t.drop_column("quality").is_err());
    }

    #[test]
    fn test_select_columns_reorders() {
        let t = table();
        let selected = t
            .select_columns(&["alcohol".to_string(), "fixed acidity".to_string()])
            .unwrap();
        assert_eq!(selected.data().row(0), array![9.4, 7.4]);
        assert!(t.select_columns(&["nope".to_string()]).is_err());
    }

    #[test]
    fn test_non_numeric_field() {
        let csv = "x,TARGET\n1.0,good\n";
        match Table::from_csv_reader(csv.as_bytes(), "bad.csv") {
            Err(DatasetError::NonNumeric { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "TARGET");
                assert_eq!(value, "good");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_field_is_nan() {
        let csv = "x,TARGET\n,1\n";
        let t = Table::from_csv_reader(csv.as_bytes(), "gap.csv").unwrap();
        assert!(t.data()[[0, 0]].is_nan());
    }

    #[test]
    fn test_ragged_row() {
        let csv = "x,TARGET\n1,2\n3\n";
        assert!(matches!(
            Table::from_csv_reader(csv.as_bytes(), "ragged.csv"),
            Err(DatasetError::Csv { .. })
        ));
    }

    #[test]
    fn test_duplicate_header() {
        let csv = "x,x\n1,2\n";
        assert!(matches!(
            Table::from_csv_reader(csv.as_bytes(), "dup.csv"),
            Err(DatasetError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_from_path_records_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, CSV).unwrap();

        let t = Table::from_csv_path(&path).unwrap();
        let source = t.source().unwrap();
        assert_eq!(source.path, path);
        assert_eq!(source.sha256, sha256::digest(CSV));
        assert_eq!(t.drop_column("TARGET").unwrap().source(), Some(source));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Table::from_csv_path(Path::new("/nonexistent/train.csv")),
            Err(DatasetError::Read { .. })
        ));
    }
}
