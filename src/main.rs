use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arraykit::arraymath::{DEFAULT_LIBRARY_PATH, LIBRARY_NAME};
use arraykit::script::{self, StringOrder};
use arraykit::walkthrough::{self, DEMO_SEQUENCE};
use arraykit::{ArrayMath, BUNDLED_NATIVE_DIR, NativeBuild};

#[derive(Debug, Parser)]
#[command(name = "arraykit", version, about = "Array and tree demonstrations with a native call boundary")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the sequence walkthrough and print every intermediate state
    Sequence {
        /// Initial elements, comma separated
        #[arg(value_delimiter = ',', default_values_t = DEMO_SEQUENCE, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Call `add` in the native arraymath library
    Add {
        /// Path of the shared library
        #[arg(long, default_value = DEFAULT_LIBRARY_PATH)]
        lib: PathBuf,

        /// Build the bundled library into the directory of --lib first and
        /// load that build
        #[arg(long)]
        build: bool,

        #[arg(default_value_t = 10, allow_negative_numbers = true)]
        a: i32,

        #[arg(default_value_t = 20, allow_negative_numbers = true)]
        b: i32,
    },

    /// Build the bundled native library with CMake
    Build {
        #[arg(long, default_value = BUNDLED_NATIVE_DIR)]
        source: PathBuf,

        #[arg(long, default_value = "default")]
        preset: String,

        #[arg(long, default_value = "build")]
        binary_dir: PathBuf,

        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Run a range-minimum query script
    Rmq { script: PathBuf },

    /// Run an AVL command script under an order code (-3 through 3)
    Avl {
        #[arg(allow_negative_numbers = true)]
        order: i32,
        script: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn build_native(source: &Path, preset: &str, binary_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let output = NativeBuild::new()
        .set_source_dir(source)
        .set_preset(preset)
        .set_binary_dir(binary_dir)
        .set_output_dir(output_dir)
        .build()
        .context("native build failed")?;
    Ok(output.library_path(LIBRARY_NAME))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sequence { values } => {
            let out = walkthrough::run(&values).context("sequence walkthrough failed")?;
            print_lines(&out.lines);
        }
        Command::Add { lib, build, a, b } => {
            let lib = if build {
                let output_dir = match lib.parent() {
                    Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                let built = build_native(
                    Path::new(BUNDLED_NATIVE_DIR),
                    "default",
                    &output_dir.join("arraymath-build"),
                    &output_dir,
                )?;
                if built != lib {
                    warn!(
                        requested = %lib.display(),
                        built = %built.display(),
                        "loading the freshly built library instead of --lib"
                    );
                }
                built
            } else {
                lib
            };

            // SAFETY: the library is expected to be a build of the bundled
            // arraymath sources.
            let math = unsafe { ArrayMath::open(&lib) }
                .with_context(|| format!("failed to load {}", lib.display()))?;
            info!(signature = %math.add_signature(), "calling native function");
            println!("{}+{}={}", a, b, math.add(a, b));
        }
        Command::Build {
            source,
            preset,
            binary_dir,
            output_dir,
        } => {
            let library = build_native(&source, &preset, &binary_dir, &output_dir)?;
            println!("{}", library.display());
        }
        Command::Rmq { script: path } => {
            let commands = script::parse_rmq(&read_script(&path)?)
                .with_context(|| format!("invalid script {}", path.display()))?;
            let (_, lines) = script::run_rmq(&commands);
            print_lines(&lines);
        }
        Command::Avl {
            order,
            script: path,
        } => {
            let order = StringOrder::from_code(order)?;
            let commands = script::parse_avl(&read_script(&path)?)
                .with_context(|| format!("invalid script {}", path.display()))?;
            let (_, lines) = script::run_avl(order, &commands);
            print_lines(&lines);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
