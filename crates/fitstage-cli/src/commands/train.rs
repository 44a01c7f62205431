use fitstage::TrainReport;
use std::path::Path;
use tracing::info;

use crate::error::CliError;

/// Run the stage for `config_path` and return the run summary
pub fn run_train(config_path: &Path) -> Result<TrainReport, CliError> {
    if !config_path.is_file() {
        return Err(CliError::ConfigNotFound(config_path.to_path_buf()));
    }

    let report = fitstage::train_and_evaluate(config_path)?;
    info!(
        run_id = %report.run_id,
        n_iter = report.n_iter,
        converged = report.converged,
        "stage finished"
    );
    Ok(report)
}
