use clap::Parser;
use fitstage_cli::Cli;
use fitstage_cli::commands::run_train;
use fitstage_cli::error::CliError;
use serde_json::json;
use std::path::{Path, PathBuf};

#[test]
fn test_default_config_path() {
    let cli = Cli::try_parse_from(["fitstage"]).unwrap();
    assert_eq!(cli.config, PathBuf::from("params.yaml"));
}

#[test]
fn test_parse_flags() {
    let cli =
        Cli::try_parse_from(["fitstage", "--config", "stage/params.toml", "-l", "debug"]).unwrap();
    assert_eq!(cli.config, PathBuf::from("stage/params.toml"));
    assert_eq!(cli.log_level, "debug");
    assert_eq!(
        cli.log_filter(),
        "fitstage=debug,fitstage_core=debug,fitstage_linear=debug,fitstage_cli=debug"
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["fitstage", "--alpha", "0.5"]).is_err());
}

#[test]
fn test_missing_config_file() {
    let result = run_train(Path::new("/nonexistent/params.yaml"));
    assert!(matches!(result, Err(CliError::ConfigNotFound(_))));
}

#[test]
fn test_run_train_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("x,TARGET\n");
    for i in 0..40 {
        csv.push_str(&format!("{},{}\n", i, 3 * i + 1));
    }
    std::fs::write(dir.path().join("train.csv"), &csv).unwrap();

    let config = json!({
        "base": { "random_state": 42, "target_col": "TARGET" },
        "split_data": {
            "train_path": dir.path().join("train.csv"),
            "test_path": dir.path().join("train.csv"),
        },
        "estimators": { "ElasticNet": { "params": { "alpha": 0.9, "l1_ratio": 0.4 } } },
        "model_dir": dir.path().join("saved_models"),
        "reports": {
            "scores": dir.path().join("report/scores.json"),
            "params": dir.path().join("report/params.json"),
        }
    });
    let config_path = dir.path().join("params.json");
    std::fs::write(&config_path, config.to_string()).unwrap();

    let report = run_train(&config_path).unwrap();
    assert!(
        report
            .render()
            .starts_with("Elasticnet model (alpha=0.900000, l1_ratio=0.400000):\n  RMSE: ")
    );
    assert!(dir.path().join("saved_models/model.joblib").exists());
    assert!(dir.path().join("report/scores.json").exists());
}

#[test]
fn test_stage_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("params.yaml");
    std::fs::write(&config_path, "base: [not, a, mapping]\n").unwrap();

    let err = run_train(&config_path).unwrap_err();
    assert!(matches!(err, CliError::Stage(fitstage::StageError::Config(_))));
    assert!(err.to_string().contains("params.yaml"));
}
