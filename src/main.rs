mod cli;

use asset_sidecar::application::dto::{
    ApiResponse, AssetStateCountsResponse, ComplianceResponse, RelatedAssetsResponse,
};
use asset_sidecar::application::factories::InventoryFactory;
use asset_sidecar::config::Settings;
use asset_sidecar::ports::inbound::AssetInventoryPort;
use asset_sidecar::shared::{ExitCode, RequestContext, Result};
use cli::{Args, Command};
use serde::Serialize;
use std::process;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("An error occurred: {}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("Caused by: {}", err);
                source = err.source();
            }

            process::exit(ExitCode::InvalidArguments.as_i32());
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON response
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Runs one command; errors are setup failures, request failures are
/// reported in the response envelope.
async fn run(args: Args) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(args.config.as_deref(), &cwd)?;
    let inventory = InventoryFactory::create(&settings)?;

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or(settings.request_timeout);
    let ctx = RequestContext::new().with_timeout(timeout);

    let token = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling request");
            token.cancel();
        }
    });

    match args.command {
        Command::Compliance(asset) => {
            let result = inventory
                .get_asset_compliance(&ctx, &asset.tenant, &asset.target_type, &asset.asset_id)
                .await;
            let response = ApiResponse::from_result(result, |compliance| {
                ApiResponse::with_message(
                    ComplianceResponse::from(&compliance),
                    ComplianceResponse::message(&compliance),
                )
            });
            present(&response, args.pretty)
        }
        Command::RelatedAssets(asset) => {
            let result = inventory
                .get_related_assets(&ctx, &asset.tenant, &asset.target_type, &asset.asset_id)
                .await;
            let response = ApiResponse::from_result(result, |nodes| {
                ApiResponse::success(RelatedAssetsResponse::from(nodes.as_slice()))
            });
            present(&response, args.pretty)
        }
        Command::AssetStates(group) => {
            let result = inventory
                .get_asset_state_counts(
                    &ctx,
                    &group.tenant,
                    &group.asset_group,
                    group.domain.as_deref(),
                )
                .await;
            let response = ApiResponse::from_result(result, |counts| {
                ApiResponse::success(AssetStateCountsResponse::from(counts.as_slice()))
            });
            present(&response, args.pretty)
        }
    }
}

fn present<T: Serialize>(response: &ApiResponse<T>, pretty: bool) -> Result<ExitCode> {
    let output = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{}", output);
    Ok(response.outcome())
}
