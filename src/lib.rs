pub mod config;
pub mod directory;
pub mod filtering;
pub mod models;
pub mod query_codec;
pub mod state;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::directory::{try_load_practitioners, HttpSource};
use crate::models::{results_heading, Practitioner};
use crate::state::{reduce, Action, DirectoryState, LoadStatus};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// What the command line prints for one query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryReport<'a> {
    pub heading: String,
    pub location: &'a str,
    pub status: &'a LoadStatus,
    pub specialties: &'a [String],
    pub practitioners: &'a [Practitioner],
}

impl<'a> DirectoryReport<'a> {
    pub fn from_state(state: &'a DirectoryState) -> Self {
        Self {
            heading: results_heading(state.visible.len()),
            location: &state.location,
            status: &state.status,
            specialties: &state.specialties,
            practitioners: &state.visible,
        }
    }
}

/// Fetch once from the configured source and apply `location` to the result.
pub async fn load_directory(settings: &config::DirectoryConfig, location: &str) -> DirectoryState {
    let state = DirectoryState::at_location(location);

    let action = match HttpSource::from_config(settings) {
        Ok(source) => match try_load_practitioners(&source).await {
            Ok(list) => Action::Loaded(list),
            Err(e) => Action::LoadFailed(e.to_string()),
        },
        Err(e) => Action::LoadFailed(e.to_string()),
    };

    reduce(state, action)
}

/// Command-line entry: `docfinder [QUERY_STRING]`, e.g. `docfinder '?sortBy=fees'`.
pub async fn run() -> std::process::ExitCode {
    init_tracing();

    let settings = config::DirectoryConfig::from_env();
    let location = std::env::args().nth(1).unwrap_or_default();

    tracing::info!(
        version = config::APP_VERSION,
        source = %settings.source_url,
        "{} starting",
        config::APP_NAME
    );

    let state = load_directory(&settings, &location).await;

    match serde_json::to_string_pretty(&DirectoryReport::from_state(&state)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize directory report");
            return std::process::ExitCode::FAILURE;
        }
    }

    if matches!(state.status, LoadStatus::Failed(_)) {
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}
