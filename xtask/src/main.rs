use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

const DIST: &str = "dist";
const EXTENSION_CRATE: &str = "field-mask-extension";
const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Field Mask extension task runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build popup and background WASM into dist/
    Build {
        /// Optimized build
        #[arg(short, long)]
        release: bool,

        /// Only build one part
        #[command(subcommand)]
        part: Option<Part>,
    },

    /// Run tests
    Test,

    /// Run clippy linter
    Clippy,

    /// Remove dist/ and cargo artifacts
    Clean,
}

#[derive(Subcommand, Clone, Copy)]
enum Part {
    /// Dioxus popup (wasm-pack, web target)
    Popup,

    /// Background service worker (no Dioxus, no-modules target)
    Background,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { release, part } => match part {
            Some(Part::Popup) => build_popup(release),
            Some(Part::Background) => build_background(release),
            None => {
                build_popup(release)?;
                build_background(release)
            }
        },
        Commands::Test => test(),
        Commands::Clippy => clippy(),
        Commands::Clean => clean(),
    }
}

fn build_popup(release: bool) -> Result<()> {
    println!("🔨 Building popup...");
    let profile = if release { "--release" } else { "--dev" };
    run_cmd(
        "wasm-pack",
        &[
            "build",
            "extension",
            profile,
            "--target",
            "web",
            "--out-dir",
            "../dist/popup",
        ],
    )?;
    println!("✅ Popup written to {}/popup", DIST);
    Ok(())
}

fn build_background(release: bool) -> Result<()> {
    println!("🔨 Building background worker...");
    let mut args = vec![
        "build",
        "-p",
        EXTENSION_CRATE,
        "--bin",
        "background",
        "--target",
        WASM_TARGET,
        // The popup's start function must not run inside the worker
        "--no-default-features",
    ];
    if release {
        args.push("--release");
    }
    run_cmd("cargo", &args)?;

    let profile_dir = if release { "release" } else { "debug" };
    let wasm = format!("target/{}/{}/background.wasm", WASM_TARGET, profile_dir);
    if !Path::new(&wasm).exists() {
        anyhow::bail!("Expected build output missing: {}", wasm);
    }

    let out_dir = format!("{}/background", DIST);
    fs::create_dir_all(&out_dir).with_context(|| format!("Failed to create {}", out_dir))?;
    run_cmd(
        "wasm-bindgen",
        &[&wasm, "--target", "no-modules", "--out-dir", &out_dir],
    )?;
    println!("✅ Background written to {}", out_dir);
    Ok(())
}

fn test() -> Result<()> {
    println!("🧪 Running all tests...");
    run_cmd("cargo", &["test", "--workspace"])?;
    Ok(())
}

fn clippy() -> Result<()> {
    println!("🔍 Running clippy on workspace (warnings as errors)...");
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    Ok(())
}

fn clean() -> Result<()> {
    println!("🧹 Removing {}...", DIST);
    // Ignore error if dist doesn't exist
    let _ = fs::remove_dir_all(DIST);

    run_cmd("cargo", &["clean"])?;
    Ok(())
}

// Helper functions
fn run_cmd(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to run: {} {}", program, args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("Command failed: {} {}", program, args.join(" "));
    }

    Ok(())
}
