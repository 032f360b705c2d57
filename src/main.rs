use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_credit_demo::config::Config;
use rust_credit_demo::database::ClientDatabase;
use rust_credit_demo::errors::{AppError, ResultExt};
use rust_credit_demo::explanations::ExplanationSet;
use rust_credit_demo::features::build_feature_vector;
use rust_credit_demo::models::{ClientRecord, DISPLAY_FEATURES};
use rust_credit_demo::prediction_client::PredictionClient;
use rust_credit_demo::waterfall::WaterfallChart;

/// Main entry point for the demo dashboard.
///
/// Initializes logging and configuration, loads the client database and the
/// SHAP explanation collection once, then runs the interactive prompt loop.
/// Errors inside the loop are reported and scoped to one action; only a
/// failed startup is fatal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_credit_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Load the read-only inputs once
    let database = ClientDatabase::load(&config.database_path)
        .context("loading client database")
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let explanations = ExplanationSet::load(&config.explanations_path)
        .context("loading SHAP values file")
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    database
        .validate_alignment(explanations.len())
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let client = PredictionClient::new(config.endpoint_url().to_string());

    println!("Pret A Depenser - prediction API demo");
    println!("Prediction endpoint: {}", client.endpoint_url());
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let ids = database
            .client_ids()
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("Known client ids: {}", ids);
        print!("Choose a client by bank id (or 'quit'): ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        let sk_id_curr: u64 = match input.parse() {
            Ok(id) => id,
            Err(_) => {
                println!("'{}' is not a client id", input);
                continue;
            }
        };

        let record = match database.find_by_id(sk_id_curr) {
            Ok(record) => record,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        println!();
        println!("Selected client: {}", sk_id_curr);
        print_client_features(record);
        print_waterfall(&database, &explanations, sk_id_curr);

        print!("Send a prediction request for this client? [y/N]: ");
        io::stdout().flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if answer.trim().eq_ignore_ascii_case("y") {
            request_prediction(&client, record).await;
        }
        println!();
    }

    Ok(())
}

/// Prints the client's values for the top display features; features the
/// database does not carry are shown as not provided.
fn print_client_features(record: &ClientRecord) {
    println!("Top feature values:");
    for feature in DISPLAY_FEATURES {
        let value = record
            .display_feature(feature)
            .unwrap_or_else(|| "not provided".to_string());
        println!("  {:<28} {}", feature, value);
    }
    println!();
}

/// Renders the SHAP waterfall for one client, or reports why it cannot.
fn print_waterfall(database: &ClientDatabase, explanations: &ExplanationSet, sk_id_curr: u64) {
    let chart = database
        .position_of(sk_id_curr)
        .and_then(|position| explanations.select(position).cloned())
        .map(|entry| WaterfallChart::from_explanation(&entry.reordered(&DISPLAY_FEATURES)));

    match chart {
        Ok(chart) => {
            println!("SHAP waterfall:");
            print!("{}", chart.render_text());
            println!();
        }
        Err(e) => println!("No explanation chart: {}", e),
    }
}

/// Builds the feature vector and posts it; every failure is reported and
/// scoped to this one action.
async fn request_prediction(client: &PredictionClient, record: &ClientRecord) {
    let built = match build_feature_vector(record) {
        Ok(built) => built,
        Err(e) => {
            println!("Cannot build feature vector: {}", e);
            return;
        }
    };
    for field in &built.sanitized_fields {
        println!("Warning: invalid value for {}, replaced with 0.0", field);
    }

    match client.predict(&built.vector).await {
        Ok(result) => {
            println!("Predicted class: {}", result.classe);
            println!(
                "Failure probability: {}",
                result.failure_probability_display()
            );
        }
        Err(e @ AppError::ExternalApiError(_)) => {
            println!("Prediction request error: {}", e);
        }
        Err(e) => println!("Prediction failed: {}", e),
    }
}
