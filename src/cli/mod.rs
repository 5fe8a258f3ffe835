// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
// This is the only layer that prints to stdout; everything
// else reports through tracing.

pub mod commands;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::Read;

use commands::{Commands, InvokeArgs, TestEndpointArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "iris-pipeline",
    version,
    about = "Train an Iris Random Forest, run its inference hooks, and smoke-test an endpoint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse the process arguments after dropping `train` flags the
    /// command does not define.
    pub fn parse_lenient() -> Self {
        let args = std::env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        Self::parse_from(drop_unknown_train_flags(args))
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)        => run_train(args),
            Commands::Invoke(args)       => run_invoke(args),
            Commands::TestEndpoint(args) => run_test_endpoint(args),
        }
    }
}

/// Remove `--flag value` and `--flag=value` pairs that `train` does not
/// declare, keeping every known flag regardless of position. A training
/// host passes all of its hyperparameters on the command line, including
/// ones meant for other frameworks. Other subcommands are returned as is.
///
/// An unknown flag swallows the next token as its value unless that
/// token is itself a `--` flag.
pub fn drop_unknown_train_flags(args: Vec<String>) -> Vec<String> {
    if args.get(1).map(String::as_str) != Some("train") {
        return args;
    }

    let mut cmd = Cli::command();
    cmd.build();
    let Some(train) = cmd.find_subcommand("train") else {
        return args;
    };
    let known: Vec<(String, bool)> = train
        .get_arguments()
        .filter_map(|a| {
            a.get_long()
                .map(|long| (format!("--{long}"), a.get_action().takes_values()))
        })
        .collect();

    let mut kept = args[..2].to_vec();
    let mut rest = args[2..].iter().peekable();

    while let Some(arg) = rest.next() {
        if !arg.starts_with("--") || arg == "--" {
            kept.push(arg.clone());
            continue;
        }

        let (name, has_inline_value) = match arg.split_once('=') {
            Some((name, _)) => (name, true),
            None            => (arg.as_str(), false),
        };

        match known.iter().find(|(flag, _)| flag == name) {
            Some((_, takes_value)) => {
                kept.push(arg.clone());
                if *takes_value && !has_inline_value {
                    kept.extend(rest.next().cloned());
                }
            }
            None => {
                let next_is_value = rest.peek().is_some_and(|next| !next.starts_with("--"));
                if !has_inline_value && next_is_value {
                    rest.next();
                }
            }
        }
    }

    kept
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let summary = TrainUseCase::new(args.into()).execute()?;

    println!("Training Accuracy: {:.4}", summary.metrics.train_accuracy);
    println!("Test Accuracy: {:.4}", summary.metrics.test_accuracy);
    println!("Model saved to {}", summary.model_path.display());
    println!("Metrics saved to {}", summary.metrics_path.display());
    println!("Report saved to {}", summary.report_path.display());
    Ok(())
}

fn run_invoke(args: InvokeArgs) -> Result<()> {
    use crate::application::inference_adapter::IrisHandler;
    use crate::application::invoke_use_case::InvokeUseCase;

    let body = read_body(&args.input)?;
    let host = InvokeUseCase::new(IrisHandler, &args.model_dir)?;
    let (response, content_type) = host.invoke(&body, &args.content_type, &args.accept)?;

    tracing::debug!("Response content type: {}", content_type);
    println!("{response}");
    Ok(())
}

fn run_test_endpoint(args: TestEndpointArgs) -> Result<()> {
    use crate::application::endpoint_test::{format_probabilities, EndpointTest};

    let test   = EndpointTest::new(args.base_url, args.endpoint_name);
    let result = test.execute()?;

    println!("\n✓ Endpoint is working!");
    println!("\nPredictions: {:?}", result.predictions);
    println!("\nProbabilities:");
    for (i, probs) in result.probabilities.iter().enumerate() {
        println!("  Sample {}: {:?}", i + 1, format_probabilities(probs));
    }
    Ok(())
}

fn read_body(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Cannot read request body from stdin")?;
        return Ok(buf);
    }
    std::fs::read(input).with_context(|| format!("Cannot read request body from '{input}'"))
}
