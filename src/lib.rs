//! # arraykit
//!
//! Array and tree data structures, plus a boundary for calling into native
//! shared libraries.
//!
//! - [`Sequence`] is a growable ordered collection whose operations report
//!   errors instead of panicking. [`walkthrough`] runs the classic list
//!   demonstration against it.
//! - [`FixedArray`] is its inline, fixed-capacity counterpart.
//! - [`native`] loads shared libraries and binds symbols under declared
//!   signatures. [`ArrayMath`] wraps the bundled `arraymath` C library,
//!   which [`NativeBuild`] compiles with CMake.
//! - [`tree`] holds a range-minimum search tree and an AVL tree, driven by
//!   the command scripts in [`script`].
//!
//! ## Quick Start
//!
//! ```
//! use arraykit::Sequence;
//!
//! let mut seq = Sequence::from(vec![5, 2, 3, 1, 4]);
//! seq.append(6);
//! seq.sort();
//! seq.reverse();
//! seq.remove(&3)?;
//! seq.insert(2, 7)?;
//! assert_eq!(seq.as_slice(), [6, 5, 7, 4, 2, 1]);
//! assert_eq!(seq.position(&4), Some(3));
//! # Ok::<(), arraykit::SequenceError>(())
//! ```
//!
//! ```no_run
//! use arraykit::{ArrayMath, NativeBuild};
//!
//! // Build the bundled library, then call into it
//! let output = NativeBuild::default()
//!     .set_preset("default")
//!     .set_binary_dir("./build")
//!     .set_output_dir("./bin")
//!     .build()?;
//!
//! let math = unsafe { ArrayMath::open(output.library_path("arraymath"))? };
//! assert_eq!(math.add(10, 20), 30);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod arraymath;
pub mod cmake;
pub mod fixed;
pub mod native;
pub mod native_build;
pub mod script;
pub mod sequence;
pub mod tree;
pub mod walkthrough;

pub use arraymath::ArrayMath;
pub use fixed::{FixedArray, FixedArrayError, StaticIntArray};
pub use native::{NativeError, NativeLibrary};
pub use native_build::{BuildError, NativeBuild};
pub use sequence::{Sequence, SequenceError};
pub use tree::{AvlTree, RangeMinTree};

/// Directory holding the bundled `arraymath` C sources and CMake presets.
pub const BUNDLED_NATIVE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/native");
