// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Foreign kernel handle loaded from a shared library.
//!
//! The library is opened with `dlopen(RTLD_NOW | RTLD_LOCAL)` and the two
//! kernel symbols are resolved with `dlsym`. The handle owns the library and
//! closes it on drop, so the resolved function pointers never outlive it.

use std::ffi::{c_void, CStr};
use std::path::{Path, PathBuf};

use crate::error::ForeignUnavailable;
use crate::kernels::Kernels;
use crate::types::Mode;

/// C ABI of the exported `fast_sum8` symbol.
pub type FastSum8Fn = unsafe extern "C" fn(i64, i64, i64, i64, i64, i64, i64, i64) -> i64;

/// C ABI of the exported `slow_compute` symbol.
pub type SlowComputeFn = unsafe extern "C" fn(u64, u64) -> u64;

const FAST_SUM8_SYMBOL: &CStr = c"fast_sum8";
const SLOW_COMPUTE_SYMBOL: &CStr = c"slow_compute";

/// An open shared library. Closed on drop.
#[derive(Debug)]
struct SharedLibrary {
    handle: *mut c_void,
    path: PathBuf,
}

impl SharedLibrary {
    #[cfg(unix)]
    fn open(path: &Path) -> Result<Self, ForeignUnavailable> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path =
            CString::new(path.as_os_str().as_bytes()).map_err(|_| ForeignUnavailable::LoadFailed {
                path: path.to_path_buf(),
                reason: "path contains an interior NUL byte".to_string(),
            })?;

        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            return Err(ForeignUnavailable::LoadFailed {
                path: path.to_path_buf(),
                reason: last_dl_error(),
            });
        }

        Ok(Self {
            handle,
            path: path.to_path_buf(),
        })
    }

    #[cfg(not(unix))]
    fn open(path: &Path) -> Result<Self, ForeignUnavailable> {
        Err(ForeignUnavailable::LoadFailed {
            path: path.to_path_buf(),
            reason: "dynamic loading is only supported on unix targets".to_string(),
        })
    }

    #[cfg(unix)]
    fn symbol(&self, name: &'static CStr) -> Result<*mut c_void, ForeignUnavailable> {
        // Clear any stale error so a NULL result can be told apart from a
        // symbol whose value is legitimately NULL.
        // SAFETY: dlerror has no preconditions.
        unsafe { libc::dlerror() };

        // SAFETY: self.handle is a live handle returned by dlopen; name is NUL-terminated.
        let sym = unsafe { libc::dlsym(self.handle, name.as_ptr()) };
        if sym.is_null() {
            return Err(ForeignUnavailable::MissingSymbol {
                path: self.path.clone(),
                symbol: symbol_name(name),
                reason: last_dl_error(),
            });
        }
        Ok(sym)
    }

    #[cfg(not(unix))]
    fn symbol(&self, name: &'static CStr) -> Result<*mut c_void, ForeignUnavailable> {
        Err(ForeignUnavailable::MissingSymbol {
            path: self.path.clone(),
            symbol: symbol_name(name),
            reason: "dynamic loading is only supported on unix targets".to_string(),
        })
    }
}

impl Drop for SharedLibrary {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            // SAFETY: handle came from a successful dlopen and is closed exactly once.
            let rc = unsafe { libc::dlclose(self.handle) };
            if rc != 0 {
                tracing::debug!(path = %self.path.display(), error = %last_dl_error(), "dlclose failed");
            }
        }
    }
}

fn symbol_name(name: &'static CStr) -> &'static str {
    name.to_str().unwrap_or("<non-utf8>")
}

#[cfg(unix)]
fn last_dl_error() -> String {
    // SAFETY: dlerror returns NULL or a pointer to a NUL-terminated string
    // that stays valid until the next dl* call on this thread.
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        "unknown dynamic loader error".to_string()
    } else {
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }
}

/// Kernels resolved from a foreign module.
pub struct ForeignKernels {
    fast_sum8: FastSum8Fn,
    slow_compute: SlowComputeFn,
    /// Keeps the library mapped while the function pointers are live.
    library: Option<SharedLibrary>,
}

impl ForeignKernels {
    /// Open `path` and resolve both kernel symbols.
    ///
    /// This does not check that the kernels compute the right thing; the
    /// probe does that before handing the kernels to the harness.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ForeignUnavailable> {
        let library = SharedLibrary::open(path.as_ref())?;
        let fast = library.symbol(FAST_SUM8_SYMBOL)?;
        let slow = library.symbol(SLOW_COMPUTE_SYMBOL)?;

        // SAFETY: the symbols are trusted to follow the hotpath C ABI; the
        // conformance gate in the probe rejects modules that don't behave.
        let (fast_sum8, slow_compute) = unsafe {
            (
                std::mem::transmute::<*mut c_void, FastSum8Fn>(fast),
                std::mem::transmute::<*mut c_void, SlowComputeFn>(slow),
            )
        };

        tracing::debug!(path = %library.path.display(), "resolved foreign kernel symbols");

        Ok(Self {
            fast_sum8,
            slow_compute,
            library: Some(library),
        })
    }

    /// Wrap function pointers that are already linked into the process.
    ///
    /// # Safety
    /// Both pointers must implement the hotpath C ABI and stay valid for the
    /// lifetime of the returned value.
    pub unsafe fn from_symbols(fast_sum8: FastSum8Fn, slow_compute: SlowComputeFn) -> Self {
        Self {
            fast_sum8,
            slow_compute,
            library: None,
        }
    }

    /// Path of the loaded library, if the kernels came from one.
    pub fn library_path(&self) -> Option<&Path> {
        self.library.as_ref().map(|lib| lib.path.as_path())
    }
}

impl std::fmt::Debug for ForeignKernels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForeignKernels")
            .field("library", &self.library_path())
            .finish_non_exhaustive()
    }
}

impl Kernels for ForeignKernels {
    fn mode(&self) -> Mode {
        Mode::Foreign
    }

    #[inline(always)]
    fn fast_sum8(&self, a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
        // SAFETY: pointer validity is guaranteed by construction (see load / from_symbols).
        unsafe { (self.fast_sum8)(a, b, c, d, e, f, g, h) }
    }

    #[inline(always)]
    fn slow_compute(&self, seed: u64, iterations: u64) -> u64 {
        // SAFETY: as above.
        unsafe { (self.slow_compute)(seed, iterations) }
    }
}
