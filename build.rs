// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common arguments: profile, setting and option overrides
fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("profile")
            .long("profile")
            .value_name("PATH")
            .help("Profile file with [settings] and [options] tables"),
        Arg::new("setting")
            .short('s')
            .long("setting")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Setting override, e.g. -s os=Windows (repeatable)"),
        Arg::new("option")
            .short('o')
            .long("option")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Option override, e.g. -o shared=True (repeatable)"),
    ]
}

/// Common arguments: kitchen config, work directory and source root
fn kitchen_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .help("Kitchen configuration file (TOML)"),
        Arg::new("work_dir")
            .long("work-dir")
            .value_name("PATH")
            .help("Work directory for export, build and package folders"),
        Arg::new("source_root")
            .long("source-root")
            .value_name("PATH")
            .default_value(".")
            .help("Recipe source root containing CMakeLists.txt"),
    ]
}

fn build_cli() -> Command {
    Command::new("clwe-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Cryptopix-CLWE Contributors")
        .about("Configure, build and package the Cryptopix-CLWE library")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Verbose logging (same as RUST_LOG=debug)"),
        )
        .subcommand(Command::new("inspect").about("Show recipe metadata and declared options"))
        .subcommand(
            Command::new("resolve")
                .about("Resolve options for a platform and show the configuration")
                .args(config_args())
                .arg(
                    Arg::new("work_dir")
                        .long("work-dir")
                        .value_name("PATH")
                        .help("Work directory used to show the folder layout"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Copy recipe sources into the export folder")
                .args(config_args())
                .args(kitchen_args()),
        )
        .subcommand(
            Command::new("generate")
                .about("Export sources and write the toolchain and dependency bindings")
                .args(config_args())
                .args(kitchen_args()),
        )
        .subcommand(
            Command::new("cook")
                .about("Run the full pipeline: export, generate, build, package")
                .args(config_args())
                .args(kitchen_args())
                .arg(
                    Arg::new("cmake")
                        .long("cmake")
                        .value_name("PATH")
                        .help("Path to the cmake binary (default: found on PATH)"),
                )
                .arg(
                    Arg::new("generator")
                        .short('G')
                        .long("generator")
                        .help("CMake generator, e.g. Ninja"),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .value_parser(clap::value_parser!(u32).range(1..))
                        .help("Number of parallel build jobs"),
                )
                .arg(
                    Arg::new("show_log")
                        .long("show-log")
                        .action(ArgAction::SetTrue)
                        .help("Print the build log after a successful cook"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Show the metadata consumers see for a configuration")
                .args(config_args()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("clwe-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
