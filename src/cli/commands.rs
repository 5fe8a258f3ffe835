// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   train          — fit, persist, quality-gate
//   invoke         — run the inference hooks locally on one body
//   test-endpoint  — smoke-test a deployed endpoint
//
// Paths default from the environment variables a training host
// sets (SM_MODEL_DIR, SM_CHANNEL_TRAIN, SM_OUTPUT_DATA_DIR), so
// the same binary works both inside a training job and locally.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::endpoint_test::DEFAULT_ENDPOINT;
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the Random Forest and write model.pkl + metrics.json
    ///
    /// Flags this command does not define are ignored, wherever they
    /// appear on the command line.
    Train(TrainArgs),

    /// Run load → parse → predict → serialize on a single request body
    Invoke(InvokeArgs),

    /// Send a fixed sample payload to a deployed endpoint and print the result
    TestEndpoint(TestEndpointArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub n_estimators: usize,

    /// Maximum depth of every tree
    #[arg(long, default_value_t = 5)]
    pub max_depth: usize,

    /// Where model.pkl and metrics.json are written
    #[arg(long, env = "SM_MODEL_DIR", default_value = "./model")]
    pub model_dir: PathBuf,

    /// Training channel; a train.csv here replaces the bundled dataset
    #[arg(long = "train", env = "SM_CHANNEL_TRAIN", default_value = "./data")]
    pub train_dir: PathBuf,

    /// Where the classification report is written
    #[arg(long, env = "SM_OUTPUT_DATA_DIR", default_value = "./output")]
    pub output_data_dir: PathBuf,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            n_estimators:    a.n_estimators,
            max_depth:       a.max_depth,
            model_dir:       a.model_dir,
            train_dir:       a.train_dir,
            output_data_dir: a.output_data_dir,
            ..TrainConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Directory containing model.pkl
    #[arg(long, env = "SM_MODEL_DIR", default_value = "./model")]
    pub model_dir: PathBuf,

    /// Request body file; "-" reads stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Content type of the request body
    #[arg(long, default_value = "application/json")]
    pub content_type: String,

    /// Requested response content type
    #[arg(long, default_value = "application/json")]
    pub accept: String,
}

#[derive(Args, Debug)]
pub struct TestEndpointArgs {
    /// Name of the deployed endpoint
    #[arg(default_value = DEFAULT_ENDPOINT)]
    pub endpoint_name: String,

    /// Base URL that serves /endpoints/{name}/invocations
    #[arg(long, env = "IRIS_ENDPOINT_URL", default_value = "http://localhost:8080")]
    pub base_url: String,
}
