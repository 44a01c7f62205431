//! The train/evaluate stage
//!
//! Nothing is written until the model has been fitted and scored, so a bad
//! config or bad input data leaves the output paths untouched. Once writing
//! starts, a failure part-way leaves the earlier files in place.

use fitstage_core::{RegressionMetrics, Regressor, RegressorMetadata, RunId};
use fitstage_linear::ElasticNet;
use ndarray::Axis;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::artifact::ModelArtifact;
use crate::config::StageConfig;
use crate::dataset::Table;
use crate::error::{Result, StageError};
use crate::report::{ParamsReport, ScoresReport, write_json};
use crate::storage::{LocalStorage, Storage};

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub run_id: RunId,
    pub estimator: RegressorMetadata,
    pub params: ParamsReport,
    pub scores: ScoresReport,
    pub model_path: PathBuf,
    pub n_train: usize,
    pub n_test: usize,
    pub feature_names: Vec<String>,
    pub n_iter: usize,
    pub converged: bool,
}

impl TrainReport {
    /// Human-readable block printed by the CLI
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Elasticnet model (alpha={:.6}, l1_ratio={:.6}):",
            self.params.alpha, self.params.l1_ratio
        );
        let _ = writeln!(out, "  RMSE: {}", self.scores.rmse);
        let _ = writeln!(out, "  MAE: {}", self.scores.mae);
        let _ = write!(out, "  R2: {}", self.scores.r2);
        out
    }
}

/// Load the config at `config_path` and run the stage
pub fn train_and_evaluate(config_path: &Path) -> Result<TrainReport> {
    let config = StageConfig::load(config_path)?;
    info!(config = %config_path.display(), "loaded configuration");
    run_stage(&config)
}

/// Run the stage with paths resolved against the working directory
pub fn run_stage(config: &StageConfig) -> Result<TrainReport> {
    run_stage_with_storage(config, &LocalStorage::current_dir())
}

/// Run the stage with every configured path resolved through `storage`
pub fn run_stage_with_storage(config: &StageConfig, storage: &dyn Storage) -> Result<TrainReport> {
    let run_id = RunId::new();
    info!(run_id = %run_id, "starting train/evaluate stage");

    let train = Table::from_csv_path(&storage.resolve(&config.split_data.train_path))?;
    let test = Table::from_csv_path(&storage.resolve(&config.split_data.test_path))?;

    let target_col = config.base.target_col.as_str();
    let train_split = train.split(target_col)?;
    let test_split = test.split(target_col)?;
    debug!(
        n_train = train_split.n_samples(),
        n_test = test_split.n_samples(),
        n_features = train_split.features.n_cols(),
        "split features and target"
    );

    let mut model = ElasticNet::new(config.elastic_net_params());
    model
        .fit(train_split.features.data(), train_split.target.view())
        .map_err(StageError::Fit)?;

    let feature_names = train_split.feature_names().to_vec();
    let test_features = test_split.features.select_columns(&feature_names)?;
    let predicted = model
        .predict(test_features.data())
        .map_err(StageError::Fit)?;

    let metrics = RegressionMetrics::evaluate(
        test_split.target.view().insert_axis(Axis(1)),
        predicted.view().insert_axis(Axis(1)),
    )
    .map_err(StageError::Metrics)?;

    let params = ParamsReport {
        alpha: config.estimators.elastic_net.params.alpha,
        l1_ratio: config.estimators.elastic_net.params.l1_ratio,
    };
    let scores = ScoresReport::from(metrics);

    info!(
        alpha = params.alpha,
        l1_ratio = params.l1_ratio,
        "Elasticnet model fitted"
    );
    info!(rmse = scores.rmse, mae = scores.mae, r2 = scores.r2, "evaluation scores");

    write_json(storage, &config.reports.scores, &scores)?;
    write_json(storage, &config.reports.params, &params)?;

    if storage.exists(&config.model_dir)? {
        debug!(path = %config.model_dir.display(), "reusing existing model directory");
    } else {
        storage.create_dir(&config.model_dir)?;
    }
    let artifact = ModelArtifact::new(run_id.clone(), model, feature_names.clone())
        .with_sources(train.source().cloned(), test.source().cloned());
    artifact.save(storage, &config.model_path())?;
    let model_path = storage.resolve(&config.model_path());
    info!(path = %model_path.display(), "saved model");

    Ok(TrainReport {
        run_id,
        estimator: artifact.model.metadata(),
        params,
        scores,
        model_path,
        n_train: train_split.n_samples(),
        n_test: test_split.n_samples(),
        feature_names,
        n_iter: artifact.model.n_iter(),
        converged: artifact.model.converged(),
    })
}
