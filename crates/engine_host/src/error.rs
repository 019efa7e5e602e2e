// crates/engine_host/src/error.rs

use engine_shared::FFIResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to load plugin library `{path}`")]
    PluginLoad {
        path: String,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin library `{path}` does not export `{symbol}`")]
    MissingSymbol {
        path: String,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin API version {found} does not match engine version {expected}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    #[error("plugin was built against a different engine_shared layout ({found:#018x}, expected {expected:#018x})")]
    LayoutMismatch { expected: u64, found: u64 },

    #[error("plugin `{call}` returned {result:?}")]
    PluginCall { call: &'static str, result: FFIResult },
}

pub type Result<T> = std::result::Result<T, HostError>;
