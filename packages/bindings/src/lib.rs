use std::sync::OnceLock;

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use passport_core::report::{self, EngineConfig};
use passport_core::simulate::SimulationDelta;
use passport_core::statement::RawStatementFile;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine configuration is loaded once per process and shared read-only
/// across requests; a reload requires a process restart.
fn engine_config() -> &'static EngineConfig {
    static CONFIG: OnceLock<EngineConfig> = OnceLock::new();
    CONFIG.get_or_init(EngineConfig::default)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_statements(input_json: String) -> NapiResult<String> {
    let files: Vec<RawStatementFile> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let card = report::analyze(&files, engine_config()).map_err(to_napi_error)?;
    serde_json::to_string(&card).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// What-if simulation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SimulateRequest {
    statements: Vec<RawStatementFile>,
    delta: SimulationDelta,
}

#[napi]
pub fn simulate_statements(input_json: String) -> NapiResult<String> {
    let request: SimulateRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let simulation =
        report::analyze_with_simulation(&request.statements, request.delta, engine_config())
            .map_err(to_napi_error)?;
    serde_json::to_string(&simulation).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[napi]
pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
