//! CLI entry point for treenote

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use treenote::logging::{Verbosity, init_logging};
use treenote::metadata::{DEFAULT_METADATA_FILE, DEFAULT_PLACEHOLDER};
use treenote::tree::{
    DEFAULT_BACKFILL_MAX_ENTRIES, DEFAULT_EXCLUDES, STRUCTURE_CONFIG_FILE, build_structure,
    save_structure, structure_to_json,
};
use treenote::{
    Error, FileSystem, IndentStyle, MetadataStore, NameSet, OsFs, RelativePath, RenderConfig,
    ScanConfig, TreeRenderer, TreeScanner, backfill, compare, load_desired_structure, print_lines,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treenote")]
#[command(about = "Keep an annotated snapshot of a repository's directory layout")]
#[command(version)]
struct Args {
    /// Repository root; relative file arguments are resolved against it
    #[arg(short = 'r', long = "root", default_value = ".", global = true)]
    root: PathBuf,

    /// Skip entries with this name at any depth (case-insensitive, globs allowed; repeatable)
    #[arg(short = 'x', long = "exclude", global = true)]
    exclude: Vec<String>,

    /// Do not skip node_modules, .git and target by default
    #[arg(long = "no-default-excludes", global = true)]
    no_default_excludes: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print or save the current directory structure as JSON
    Scan {
        /// Write the structure to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Compare the current structure with the desired one (exit status 1 on differences)
    Check {
        /// Desired structure document
        #[arg(short = 'c', long = "config", default_value = STRUCTURE_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Create missing directories and placeholder files from the desired structure
    Build {
        /// Desired structure document
        #[arg(short = 'c', long = "config", default_value = STRUCTURE_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Add placeholder descriptions for files missing from the metadata document
    Backfill {
        /// Description document
        #[arg(short = 'm', long = "metadata", default_value = DEFAULT_METADATA_FILE)]
        metadata: PathBuf,

        /// Text used for new entries
        #[arg(long = "placeholder", default_value = DEFAULT_PLACEHOLDER)]
        placeholder: String,

        /// Skip directories with more entries than this (0 = no limit)
        #[arg(long = "max-entries", default_value_t = DEFAULT_BACKFILL_MAX_ENTRIES)]
        max_entries: usize,
    },

    /// Render the directory as an annotated tree
    Tree {
        /// Description document
        #[arg(short = 'm', long = "metadata", default_value = DEFAULT_METADATA_FILE)]
        metadata: PathBuf,

        /// Show this directory as a one-line item count (repeatable)
        #[arg(long = "compress")]
        compress: Vec<String>,

        /// Draw the tree with ASCII connectors
        #[arg(long = "ascii")]
        ascii: bool,

        /// Write the tree to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Control color output: auto, always, never
        #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
        color: ColorMode,
    },
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn exclusions(args: &Args) -> NameSet {
    let mut set = NameSet::default();
    if !args.no_default_excludes {
        for name in DEFAULT_EXCLUDES {
            set.add(name);
        }
    }
    for name in &args.exclude {
        set.add(name);
    }
    set
}

fn run(args: &Args) -> treenote::Result<ExitCode> {
    let fs = OsFs;
    let root = args.root.as_path();
    if !fs.exists(root) {
        return Err(Error::scan_io(root, std::io::ErrorKind::NotFound.into()));
    }

    let scan_config = ScanConfig {
        exclude: exclusions(args),
        ..Default::default()
    };

    match &args.command {
        Command::Scan { output } => {
            let (structure, report) = TreeScanner::new(fs, scan_config).scan_with_report(root);
            info!(
                "scanned {} directories and {} files",
                report.dirs, report.files
            );
            if report.is_degraded() {
                warn!("{} entries could not be read", report.degraded);
            }
            match output {
                Some(path) => save_structure(&fs, &resolve(root, path), &structure)?,
                None => print!("{}", structure_to_json(&structure)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { config } => {
            let desired = load_desired_structure(&fs, &resolve(root, config))?;
            let current = TreeScanner::new(fs, scan_config).scan(root);
            let diff = compare(&desired, &current);
            println!("{}", serde_json::to_string_pretty(&diff)?);
            if diff.is_empty() {
                info!("structure matches {}", config.display());
                Ok(ExitCode::SUCCESS)
            } else {
                info!("structure differs from {}", config.display());
                Ok(ExitCode::from(1))
            }
        }
        Command::Build { config } => {
            let desired = load_desired_structure(&fs, &resolve(root, config))?;
            let report = build_structure(&fs, root, &desired)?;
            info!(
                "created {} directories and {} files",
                report.created_dirs, report.created_files
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Backfill {
            metadata,
            placeholder,
            max_entries,
        } => {
            let limit = (*max_entries > 0).then_some(*max_entries);
            let scanner = TreeScanner::new(fs, scan_config.with_max_entries(limit));
            let (structure, scan_report) = scanner.scan_with_report(root);
            let metadata_path = resolve(root, metadata);
            let mut paths = structure.file_paths();
            // The description document never describes itself.
            if let Ok(own) = metadata_path.strip_prefix(root) {
                let own = RelativePath::new(own.iter().map(|s| s.to_string_lossy().into_owned()));
                paths.retain(|path| *path != own);
            }
            info!("collected {} file(s)", paths.len());
            if scan_report.is_degraded() {
                warn!("{} entries could not be read", scan_report.degraded);
            }

            let store = MetadataStore::new(fs);
            let mut descriptions = store.load(&metadata_path);
            let report = backfill(&mut descriptions, &paths, placeholder);

            if report.changed() || !store.exists(&metadata_path) {
                store.save(&metadata_path, &descriptions)?;
                info!(
                    "added {} placeholder(s), converted {} entr(ies)",
                    report.inserted, report.converted
                );
            } else {
                info!("metadata already up to date");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Tree {
            metadata,
            compress,
            ascii,
            output,
            color,
        } => {
            let descriptions = MetadataStore::new(fs).load(&resolve(root, metadata));
            let config = RenderConfig {
                compress: NameSet::new(compress),
                exclude: scan_config.exclude,
                indent: if *ascii {
                    IndentStyle::Ascii
                } else {
                    IndentStyle::Unicode
                },
            };
            let renderer = TreeRenderer::new(fs, config);
            match output {
                Some(path) => {
                    let path = resolve(root, path);
                    renderer.write_to(root, &descriptions, &path)?;
                    info!("file tree generated at {}", path.display());
                }
                None => {
                    let lines = renderer.lines(root, &descriptions);
                    print_lines(&lines, should_use_color(*color))
                        .map_err(|e| Error::io("<stdout>", e))?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let verbosity = Verbosity::from_flags(args.verbose, args.quiet);
    if let Err(e) = init_logging(verbosity, std::io::stderr().is_terminal()) {
        eprintln!("treenote: failed to initialize logging: {}", e);
    }

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("treenote: {}", e);
            ExitCode::from(2)
        }
    }
}
