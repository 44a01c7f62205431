use ndarray::Array1;
use tracing::warn;

use super::{Result, Table};

/// Column the target vector is always read from
pub const TARGET_COLUMN: &str = "TARGET";

/// Feature matrix and target vector for one split
#[derive(Debug, Clone)]
pub struct Split {
    pub features: Table,
    pub target: Array1<f64>,
}

impl Split {
    pub fn feature_names(&self) -> &[String] {
        self.features.columns()
    }

    pub fn n_samples(&self) -> usize {
        self.target.len()
    }
}

/// Split a table into features and target.
///
/// The target vector comes from [`TARGET_COLUMN`]; the feature matrix is every
/// column except `drop_col`. The two names are resolved independently, so
/// when they differ the `TARGET` column stays among the features.
pub fn split_features_target(table: &Table, drop_col: &str) -> Result<Split> {
    let target = table.column(TARGET_COLUMN)?;
    let features = table.drop_column(drop_col)?;

    if drop_col != TARGET_COLUMN {
        warn!(
            target_col = drop_col,
            target_column = TARGET_COLUMN,
            "configured target_col differs from the target column; '{}' remains a feature",
            TARGET_COLUMN
        );
    }

    Ok(Split { features, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetError;
    use ndarray::array;

    fn table(header: &str) -> Table {
        let csv = format!("{}\n1,10,2\n2,20,4\n", header);
        Table::from_csv_reader(csv.as_bytes(), "split.csv").unwrap()
    }

    #[test]
    fn test_split_matching_names() {
        let split = split_features_target(&table("x,z,TARGET"), "TARGET").unwrap();
        assert_eq!(split.feature_names(), ["x", "z"]);
        assert_eq!(split.target, array![2.0, 4.0]);
        assert_eq!(split.n_samples(), 2);
    }

    #[test]
    fn test_divergent_names_keep_target_as_feature() {
        let split = split_features_target(&table("x,quality,TARGET"), "quality").unwrap();
        assert_eq!(split.feature_names(), ["x", "TARGET"]);
        assert_eq!(split.target, array![2.0, 4.0]);
    }

    #[test]
    fn test_missing_target_column() {
        let result = split_features_target(&table("x,z,quality"), "quality");
        assert!(matches!(
            result,
            Err(DatasetError::MissingColumn { ref column, .. }) if column == TARGET_COLUMN
        ));
    }

    #[test]
    fn test_missing_configured_column() {
        let result = split_features_target(&table("x,z,TARGET"), "quality");
        assert!(matches!(
            result,
            Err(DatasetError::MissingColumn { ref column, .. }) if column == "quality"
        ));
    }
}
