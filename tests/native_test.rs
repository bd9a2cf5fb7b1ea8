use arraykit::native::{NativeError, NativeLibrary};
use arraykit::native_build::BuildOutput;
use arraykit::{ArrayMath, BuildError, NativeBuild};

#[cfg(all(target_os = "linux", target_env = "gnu"))]
type AbsFn = unsafe extern "C" fn(i32) -> i32;

#[test]
fn missing_library_is_not_found() {
    let err = unsafe { NativeLibrary::open("./no/such/dir/libarraymath.so") }.unwrap_err();
    assert!(matches!(err, NativeError::NotFound { .. }));
}

#[test]
fn arraymath_reports_missing_library() {
    let dir = tempfile::tempdir().unwrap();
    let err = unsafe { ArrayMath::open(dir.path().join("libarraymath.so")) }.unwrap_err();
    assert!(matches!(err, NativeError::NotFound { .. }));
}

#[test]
fn garbage_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("libgarbage.so");
    std::fs::write(&path, b"this is not a shared library").unwrap();

    let err = unsafe { NativeLibrary::open(&path) }.unwrap_err();
    match err {
        NativeError::Load { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected load error, got {other:?}"),
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn calls_into_system_libc() {
    let libc = unsafe { NativeLibrary::open("libc.so.6") }.unwrap();
    let abs = unsafe { libc.bind::<AbsFn>("abs") }.unwrap();

    assert_eq!(abs.signature().to_string(), "abs(i32) -> i32");
    assert_eq!(abs.call((-5,)), 5);
    assert_eq!(abs.call((30,)), 30);
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn missing_symbol() {
    let libc = unsafe { NativeLibrary::open("libc.so.6") }.unwrap();
    let err = unsafe { libc.bind::<AbsFn>("arraykit_no_such_symbol") }.unwrap_err();
    match err {
        NativeError::Symbol { name, .. } => assert_eq!(name, "arraykit_no_such_symbol"),
        other => panic!("expected symbol error, got {other:?}"),
    }
}

/// Builds the bundled library into `dir`, or returns `None` when this
/// machine has no usable CMake toolchain.
fn build_bundled(dir: &std::path::Path) -> Option<BuildOutput> {
    if which::which("cmake").is_err() {
        eprintln!("cmake not found in PATH, skipping");
        return None;
    }

    let result = NativeBuild::new()
        .set_preset("default")
        .set_binary_dir(dir.join("build"))
        .set_output_dir(dir.join("out"))
        .build();

    match result {
        Ok(output) => Some(output),
        Err(err @ BuildError::ConfigureFailed { .. }) => {
            eprintln!("cmake could not configure a C toolchain ({err}), skipping");
            None
        }
        Err(err) => panic!("native build failed: {err}"),
    }
}

#[test]
fn builds_and_calls_bundled_library() {
    let dir = tempfile::tempdir().unwrap();
    let Some(output) = build_bundled(dir.path()) else {
        return;
    };

    let library = output.library_path("arraymath");
    assert!(library.exists(), "{} missing", library.display());

    let math = unsafe { ArrayMath::open(&library) }.unwrap();
    assert_eq!(math.add_signature().to_string(), "add(i32, i32) -> i32");
    assert_eq!(math.add(10, 20), 30);
    assert_eq!(math.add(-7, 7), 0);
    assert_eq!(math.path(), library.as_path());
}

#[test]
fn bundled_library_through_generic_binding() {
    let dir = tempfile::tempdir().unwrap();
    let Some(output) = build_bundled(dir.path()) else {
        return;
    };

    type AddFn = unsafe extern "C" fn(i32, i32) -> i32;
    let lib = unsafe { NativeLibrary::open(output.library_path("arraymath")) }.unwrap();
    let add = unsafe { lib.bind::<AddFn>("add") }.unwrap();
    assert_eq!(add.call((10, 20)), 30);
}
