//! Process-wide libvips runtime lifecycle.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use tracing::{debug, info};

use crate::processing::libvips::Image;
use crate::utils::{ConvertError, ConvertResult};

/// Where the process is in the libvips lifecycle.
///
/// libvips keeps global state that can be set up once and torn down once;
/// `vips_init` after `vips_shutdown` is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Active,
    TornDown,
}

lazy_static! {
    static ref LIFECYCLE: Mutex<Lifecycle> = Mutex::new(Lifecycle::Uninitialized);
}

fn lifecycle() -> MutexGuard<'static, Lifecycle> {
    LIFECYCLE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the libvips `VipsApp`, which initializes global state on creation
/// and shuts it down on drop.
///
/// # Safety
/// libvips is designed for multi-threaded use. The guard only moves between
/// threads together with the `Runtime` that owns it.
struct VipsAppGuard(libvips::VipsApp);

unsafe impl Send for VipsAppGuard {}

/// The initialized image-processing runtime.
///
/// At most one exists per process. Image handles borrow it mutably, so a
/// handle can never outlive the runtime and only one handle is live at a
/// time.
pub struct Runtime {
    vips: VipsAppGuard,
}

impl Runtime {
    /// Initializes libvips under the program name `name`.
    ///
    /// Fails when a runtime is already live or when libvips was shut down
    /// earlier in this process.
    pub fn init(name: &str) -> ConvertResult<Self> {
        let mut state = lifecycle();

        match *state {
            Lifecycle::Active => {
                return Err(ConvertError::init("libvips is already initialized in this process"));
            }
            Lifecycle::TornDown => {
                return Err(ConvertError::init("libvips cannot be re-initialized after shutdown"));
            }
            Lifecycle::Uninitialized => {}
        }

        let vips = libvips::VipsApp::new(name, false)
            .map_err(|e| ConvertError::init(format!("Failed to initialize libvips: {e}")))?;
        // 0 = let libvips decide based on available CPU cores
        vips.concurrency_set(0);

        *state = Lifecycle::Active;

        let runtime = Self { vips: VipsAppGuard(vips) };
        info!("libvips {} initialized", runtime.version());
        debug!("libvips concurrency: {}", runtime.vips.0.concurency_get());

        Ok(runtime)
    }

    /// Whether a runtime is currently live in this process.
    pub fn is_active() -> bool {
        *lifecycle() == Lifecycle::Active
    }

    /// Creates an empty image handle.
    pub fn acquire(&mut self) -> Image<'_> {
        Image::new(self)
    }

    /// Creates a handle and reads `path` into it.
    pub fn open(&mut self, path: impl AsRef<Path>) -> ConvertResult<Image<'_>> {
        let mut image = self.acquire();
        image.read(path)?;
        Ok(image)
    }

    /// The libvips version string.
    pub fn version(&self) -> String {
        self.vips
            .0
            .version_string()
            .map(str::to_string)
            .unwrap_or_else(|_| "(unknown version)".to_string())
    }

    /// Drains the libvips error buffer.
    ///
    /// libvips reports failures as a bare status and leaves the diagnosis in
    /// a global buffer; this returns it once and clears it.
    pub fn take_error(&self) -> Option<String> {
        let message = self
            .vips
            .0
            .error_buffer()
            .map(|buffer| buffer.trim().to_string())
            .unwrap_or_default();
        self.vips.0.error_clear();

        if message.is_empty() { None } else { Some(message) }
    }

    /// Tears libvips down. Equivalent to dropping the runtime.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        *lifecycle() = Lifecycle::TornDown;
        debug!("libvips runtime shut down");
        // `VipsAppGuard` drops after this, calling `vips_shutdown`.
    }
}
