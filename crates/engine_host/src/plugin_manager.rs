// crates/engine_host/src/plugin_manager.rs

use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{error, info, warn};

use engine_shared::input_types::InputState;
use engine_shared::plugin_api::{layout_hash, FFIResult, HostContext, HostInterface, PluginApi};
use engine_shared::ENGINE_API_VERSION;

use crate::error::{HostError, Result};

pub struct PluginHandle {
    pub api: PluginApi,
    /// `None` when the plugin was linked statically.
    lib: Option<Library>,
    pub path: Option<PathBuf>,
}

impl PluginHandle {
    /// Accept a table built in-process and run the handshake on it.
    pub fn from_api(api: PluginApi) -> Result<Self> {
        handshake(&api)?;
        Ok(Self {
            api,
            lib: None,
            path: None,
        })
    }

    /// Load a plugin cdylib and run the handshake.
    ///
    /// # Safety
    /// Loading a library runs its initializers; `path` must be a plugin built
    /// against this workspace's `engine_shared`.
    pub unsafe fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let lib = Library::new(path).map_err(|source| HostError::PluginLoad {
            path: display.clone(),
            source,
        })?;

        let version_fn: Symbol<extern "C" fn() -> u32> =
            lib.get(b"get_api_version").map_err(|source| HostError::MissingSymbol {
                path: display.clone(),
                symbol: "get_api_version",
                source,
            })?;
        let found = version_fn();
        if found != ENGINE_API_VERSION {
            return Err(HostError::ApiVersionMismatch {
                expected: ENGINE_API_VERSION,
                found,
            });
        }

        let create_fn: Symbol<extern "C" fn() -> PluginApi> =
            lib.get(b"_create_game").map_err(|source| HostError::MissingSymbol {
                path: display.clone(),
                symbol: "_create_game",
                source,
            })?;
        let api = create_fn();
        handshake(&api)?;

        info!(path = %path.display(), "plugin library loaded");
        Ok(Self {
            api,
            lib: Some(lib),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn is_dynamic(&self) -> bool {
        self.lib.is_some()
    }
}

impl Drop for PluginHandle {
    fn drop(&mut self) {
        // State first: its drop code lives in the library.
        (self.api.drop_state)(self.api.state);
    }
}

/// Version and layout checks. A rejected table has its state released here.
fn handshake(api: &PluginApi) -> Result<()> {
    let found = (api.get_api_version)();
    if found != ENGINE_API_VERSION {
        (api.drop_state)(api.state);
        return Err(HostError::ApiVersionMismatch {
            expected: ENGINE_API_VERSION,
            found,
        });
    }

    let expected = layout_hash();
    let found = (api.get_layout_hash)();
    if found != expected {
        (api.drop_state)(api.state);
        return Err(HostError::LayoutMismatch { expected, found });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRuntimeState {
    Running,
    PausedError(String),
}

pub struct PluginManager {
    plugin: PluginHandle,
    runtime_state: PluginRuntimeState,
}

impl PluginManager {
    pub fn new(plugin: PluginHandle) -> Self {
        Self {
            plugin,
            runtime_state: PluginRuntimeState::Running,
        }
    }

    pub fn plugin(&self) -> &PluginHandle {
        &self.plugin
    }

    pub fn runtime_state(&self) -> &PluginRuntimeState {
        &self.runtime_state
    }

    pub fn is_running(&self) -> bool {
        self.runtime_state == PluginRuntimeState::Running
    }

    pub fn initial_load(&mut self, ctx: *mut HostContext, host_interface: &HostInterface) -> Result<()> {
        let res = (self.plugin.api.on_load)(
            self.plugin.api.state,
            ctx,
            host_interface as *const HostInterface,
        );
        match res {
            FFIResult::Success => Ok(()),
            other => {
                error!(result = ?other, "plugin on_load failed");
                self.runtime_state = PluginRuntimeState::PausedError(format!("on_load returned {other:?}"));
                Err(HostError::PluginCall {
                    call: "on_load",
                    result: other,
                })
            }
        }
    }

    pub fn update(&mut self, ctx: *mut HostContext, input: &InputState, dt: f32) {
        if !self.is_running() {
            return;
        }

        let res = (self.plugin.api.on_update)(self.plugin.api.state, ctx, input as *const InputState, dt);

        match res {
            FFIResult::Success => {}
            FFIResult::PanicDetected => {
                error!("plugin panicked during update, pausing it");
                self.runtime_state = PluginRuntimeState::PausedError("Panic during update".into());
            }
            other => {
                // Non-success from update is unusual but we log and keep running.
                warn!(result = ?other, "plugin on_update returned an error");
            }
        }
    }

    pub fn unload(&mut self, ctx: *mut HostContext) {
        let res = (self.plugin.api.on_unload)(self.plugin.api.state, ctx);
        if res != FFIResult::Success {
            warn!(result = ?res, "plugin on_unload returned an error");
        }
    }
}
