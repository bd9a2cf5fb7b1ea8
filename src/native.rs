//! Calling into native shared libraries.
//!
//! A [`NativeLibrary`] is opened by path and stays loaded until it is
//! dropped. Symbols are bound under a signature declared as an
//! `unsafe extern "C" fn` type:
//!
//! ```no_run
//! use arraykit::native::NativeLibrary;
//!
//! type AddFn = unsafe extern "C" fn(i32, i32) -> i32;
//!
//! # fn main() -> Result<(), arraykit::native::NativeError> {
//! let lib = unsafe { NativeLibrary::open("./libarraymath.so")? };
//! let add = unsafe { lib.bind::<AddFn>("add")? };
//! assert_eq!(add.call((10, 20)), 30);
//! # Ok(())
//! # }
//! ```
//!
//! Nothing checks the declared signature against the library. Binding with
//! the wrong one is undefined behavior, which is why [`NativeLibrary::bind`]
//! is `unsafe`.

use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum NativeError {
    #[error("native library not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to load native library {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("symbol `{name}` not found in {}: {source}", path.display())]
    Symbol {
        name: String,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
}

/// A scalar that can cross the C ABI unchanged.
pub trait CType: Copy + 'static {
    const NAME: &'static str;
}

macro_rules! impl_ctype {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl CType for $ty {
            const NAME: &'static str = $name;
        })*
    };
}

impl_ctype! {
    () => "void",
    i8 => "i8",
    u8 => "u8",
    i16 => "i16",
    u16 => "u16",
    i32 => "i32",
    u32 => "u32",
    i64 => "i64",
    u64 => "u64",
    isize => "isize",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

/// A C function pointer type whose arguments and result are all [`CType`]s.
///
/// Implemented for `unsafe extern "C" fn(A, ..) -> R` with up to four
/// parameters. Arguments are passed as a tuple.
pub trait ForeignFn: Copy + 'static {
    type Args;
    type Output;

    fn params() -> Vec<&'static str>;

    fn returns() -> &'static str;

    /// # Safety
    ///
    /// `self` must point to a function with exactly this signature.
    unsafe fn invoke(self, args: Self::Args) -> Self::Output;
}

macro_rules! impl_foreign_fn {
    ($($arg:ident),*) => {
        impl<R: CType, $($arg: CType),*> ForeignFn for unsafe extern "C" fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;

            fn params() -> Vec<&'static str> {
                vec![$($arg::NAME),*]
            }

            fn returns() -> &'static str {
                R::NAME
            }

            #[allow(non_snake_case)]
            unsafe fn invoke(self, args: Self::Args) -> R {
                let ($($arg,)*) = args;
                unsafe { self($($arg),*) }
            }
        }
    };
}

impl_foreign_fn!();
impl_foreign_fn!(A);
impl_foreign_fn!(A, B);
impl_foreign_fn!(A, B, C);
impl_foreign_fn!(A, B, C, D);

/// Name and declared types of a bound symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<&'static str>,
    pub returns: &'static str,
}

impl Signature {
    pub fn of<F: ForeignFn>(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            params: F::params(),
            returns: F::returns(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.name, self.params.join(", "), self.returns)
    }
}

#[derive(Debug)]
pub struct NativeLibrary {
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    /// Loads a shared library.
    ///
    /// A path with a directory component (`./libfoo.so`) must exist. A bare
    /// file name is handed to the platform loader's search.
    ///
    /// # Safety
    ///
    /// Loading runs the library's initialization routines, which may do
    /// anything.
    pub unsafe fn open(path: impl AsRef<Path>) -> Result<Self, NativeError> {
        let path = path.as_ref();

        if path.components().count() > 1 && !path.exists() {
            return Err(NativeError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let library = unsafe { Library::new(path) }.map_err(|source| NativeError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded native library");
        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves `name` under the declared signature `F`.
    ///
    /// # Safety
    ///
    /// `F` must match the exported function's real signature and calling
    /// convention. A mismatch is undefined behavior when the binding is
    /// called.
    pub unsafe fn bind<F: ForeignFn>(&self, name: &str) -> Result<Binding<'_, F>, NativeError> {
        let symbol = unsafe { self.library.get::<F>(name.as_bytes()) }.map_err(|source| {
            NativeError::Symbol {
                name: name.to_owned(),
                path: self.path.clone(),
                source,
            }
        })?;

        let signature = Signature::of::<F>(name);
        debug!(%signature, library = %self.path.display(), "bound native symbol");
        Ok(Binding { signature, symbol })
    }
}

/// A bound symbol. Borrows the library so it cannot outlive it.
pub struct Binding<'lib, F: ForeignFn> {
    signature: Signature,
    symbol: Symbol<'lib, F>,
}

impl<F: ForeignFn> Binding<'_, F> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the function synchronously.
    pub fn call(&self, args: F::Args) -> F::Output {
        let func: F = *self.symbol;
        // SAFETY: `bind` required the declared signature to be correct.
        unsafe { func.invoke(args) }
    }

    /// Detaches the raw function pointer from the library borrow.
    ///
    /// # Safety
    ///
    /// The returned pointer must not be called after the library it came
    /// from is dropped.
    pub unsafe fn into_raw(self) -> F {
        *self.symbol
    }
}

impl<F: ForeignFn> fmt::Debug for Binding<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
