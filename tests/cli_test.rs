use std::path::Path;
use std::process::{Command, Output};

fn arraykit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arraykit"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run arraykit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const WALKTHROUGH: &str = "\
Element at index 2: 3
After appending 6: [5, 2, 3, 1, 4, 6]
Sorted list: [1, 2, 3, 4, 5, 6]
Reversed list: [6, 5, 4, 3, 2, 1]
After removing 3: [6, 5, 4, 2, 1]
After inserting 7 at index 2: [6, 5, 7, 4, 2, 1]
Element 4 found at index: 3
";

#[test]
fn sequence_prints_walkthrough() {
    let output = arraykit(&["sequence"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), WALKTHROUGH);
}

#[test]
fn sequence_missing_value_exits_nonzero() {
    let output = arraykit(&["sequence", "1,2,4"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("value not found"), "{}", stderr(&output));
}

#[test]
fn logs_go_to_stderr_only() {
    let output = arraykit(&["-vv", "sequence"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), WALKTHROUGH);
    assert!(stderr(&output).contains("walkthrough step"), "{}", stderr(&output));
}

#[test]
fn add_missing_library_exits_nonzero() {
    let output = arraykit(&["add", "--lib", "./no/such/dir/libarraymath.so"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("not found"), "{}", stderr(&output));
}

#[test]
fn avl_rejects_bad_order_code() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("words.txt");
    std::fs::write(&script, "insert pear").unwrap();

    let output = arraykit(&["avl", "9", script.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("invalid order code 9"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn avl_runs_script_with_negative_order() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("words.txt");
    std::fs::write(&script, "insert apple insert pear traverse").unwrap();

    let output = arraykit(&["avl", "-1", script.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Inserted : apple\nInserted : pear\nIn-Order Traversal :\npear\napple\n"
    );
}

#[test]
fn rmq_runs_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("rmq.txt");
    std::fs::write(&script, "3\nIN 2 20\nIN 1 10\nRMQ 1 2\n").unwrap();

    let output = arraykit(&["rmq", script.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Inserting 20 @ index : 2\nInserting 10 @ index : 1\n"));
    assert!(out.contains("Range minimum query between indices: [1, 2] = 10\n"));
}

/// Runs `add --build`, returning `None` when no CMake toolchain is usable.
fn add_with_build(lib: &Path) -> Option<Output> {
    if which::which("cmake").is_err() {
        eprintln!("cmake not found in PATH, skipping");
        return None;
    }

    let output = arraykit(&["add", "--build", "--lib", lib.to_str().unwrap()]);
    if !output.status.success() && stderr(&output).contains("configure failed") {
        eprintln!("cmake could not configure a C toolchain, skipping");
        return None;
    }
    Some(output)
}

#[test]
fn add_builds_and_prints_sum() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join(libloading::library_filename("arraymath"));
    let Some(output) = add_with_build(&lib) else {
        return;
    };

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "10+20=30\n");
}

#[test]
fn add_build_loads_built_library_for_custom_lib_name() {
    let dir = tempfile::tempdir().unwrap();
    let Some(output) = add_with_build(&dir.path().join("custom.so")) else {
        return;
    };

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "10+20=30\n");
}
