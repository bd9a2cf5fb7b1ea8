use std::path::Path;

use crate::native::{NativeError, NativeLibrary, Signature};

/// Where the `arraymath` shared library is expected when no path is given.
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY_PATH: &str = "./arraymath.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY_PATH: &str = "./libarraymath.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY_PATH: &str = "./libarraymath.so";

pub const LIBRARY_NAME: &str = "arraymath";

type AddFn = unsafe extern "C" fn(i32, i32) -> i32;

/// Safe handle on the bundled `arraymath` library.
#[derive(Debug)]
pub struct ArrayMath {
    add: AddFn,
    add_signature: Signature,
    library: NativeLibrary,
}

impl ArrayMath {
    /// Loads the library and binds its exports.
    ///
    /// # Safety
    ///
    /// `path` must name a build of the bundled `arraymath` sources, so that
    /// `add` really is `int add(int, int)`.
    pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self, NativeError> {
        let library = unsafe { NativeLibrary::open(path)? };
        let binding = unsafe { library.bind::<AddFn>("add")? };
        let add_signature = binding.signature().clone();
        // SAFETY: the pointer is stored next to the library that owns it and
        // both are dropped together.
        let add = unsafe { binding.into_raw() };

        Ok(Self {
            add,
            add_signature,
            library,
        })
    }

    pub fn path(&self) -> &Path {
        self.library.path()
    }

    pub fn add_signature(&self) -> &Signature {
        &self.add_signature
    }

    pub fn add(&self, a: i32, b: i32) -> i32 {
        // SAFETY: `open` bound `add` with its real signature and the library
        // is still loaded.
        unsafe { (self.add)(a, b) }
    }
}
