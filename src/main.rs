use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use eol_guardian::config::{
	SETTINGS_FILE, discover_settings, generate_init_template, merge_settings, user_settings_path,
};
use eol_guardian::editorconfig::{Resolver, Schema, normalize_lexically};
use eol_guardian::eol::{EolStats, ExpectedSource};
use eol_guardian::glob::Pattern;
use eol_guardian::workspace::{FileReport, FixOutcome, Workspace};

#[derive(Parser)]
#[command(name = "eolg")]
#[command(
	author,
	version,
	about = "Check and fix line endings using .editorconfig cascades"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .eolguard.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .eolguard.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Print debug logging to stderr
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Skip ~/.eolguard.toml
	#[arg(long, global = true)]
	no_user_config: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the .editorconfig properties that apply to files
	Resolve {
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Test paths against a glob pattern (exits 1 if none match)
	Match {
		pattern: String,
		#[arg(required = true)]
		paths: Vec<String>,
	},
	/// Report files whose line endings differ from what is expected
	Check {
		/// Files or directories (defaults to the current directory)
		paths: Vec<PathBuf>,
	},
	/// Convert files to their expected line endings
	Fix {
		/// Files or directories (defaults to the current directory)
		paths: Vec<PathBuf>,
	},
	/// Settings management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered settings files and the merged result
	Show,
	/// Check all settings files for errors
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if cli.init {
		return handle_init(cli.force);
	}

	let include_user = !cli.no_user_config;
	match cli.command {
		Some(Commands::Resolve { files }) => handle_resolve(&files),
		Some(Commands::Match { pattern, paths }) => handle_match(&pattern, &paths),
		Some(Commands::Check { paths }) => handle_check(&paths, include_user),
		Some(Commands::Fix { paths }) => handle_fix(&paths, include_user),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(include_user),
			ConfigAction::Validate => handle_config_validate(include_user),
		},
		// Unreachable in practice due to arg_required_else_help
		None => Ok(ExitCode::SUCCESS),
	}
}

fn init_logging(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.format_timestamp(None)
		.init();
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let settings_path = PathBuf::from(SETTINGS_FILE);

	if settings_path.exists() && !force {
		anyhow::bail!("{SETTINGS_FILE} already exists. Use --force to overwrite.");
	}

	std::fs::write(&settings_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", settings_path.display()))?;

	println!("Created {SETTINGS_FILE}");
	Ok(ExitCode::SUCCESS)
}

fn handle_resolve(files: &[PathBuf]) -> Result<ExitCode> {
	let resolver = Resolver::new(Schema::eol());

	for file in files {
		let target = std::path::absolute(file)
			.map(|path| normalize_lexically(&path))
			.with_context(|| format!("Failed to resolve path: {}", file.display()))?;
		let resolution = resolver.resolve(&target);

		println!("{}", target.display());
		for key in resolver.schema().keys() {
			match resolution.get(key.name()) {
				Some(property) => {
					let section = property
						.section
						.as_deref()
						.map(|s| format!(" [{s}]"))
						.unwrap_or_default();
					println!(
						"  {} = {}  ({}:{}{})",
						key.name(),
						property.value,
						property.source.display(),
						property.line,
						section
					);
				}
				None => println!("  {}: unset", key.name()),
			}
		}
		for source in resolution.sources() {
			println!("  # read {}", source.display());
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_match(pattern: &str, paths: &[String]) -> Result<ExitCode> {
	let compiled = Pattern::compile(pattern);
	let mut any_matched = false;

	for path in paths {
		let matched = compiled.matches(path);
		any_matched |= matched;
		println!("{}\t{}", if matched { "match" } else { "no match" }, path);
	}

	Ok(if any_matched {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn load_workspace(include_user: bool) -> Result<Workspace> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = discover_settings(&cwd, include_user).context("Failed to load settings")?;
	Ok(Workspace::new(&cwd, merge_settings(&loaded)))
}

fn target_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
	if paths.is_empty() {
		vec![PathBuf::from(".")]
	} else {
		paths.to_vec()
	}
}

fn handle_check(paths: &[PathBuf], include_user: bool) -> Result<ExitCode> {
	let workspace = load_workspace(include_user)?;
	let files = workspace
		.collect_files(&target_paths(paths))
		.context("Failed to collect files")?;

	let mut checked = 0;
	let mut flagged = 0;
	for file in &files {
		let report = match workspace.check_file(file) {
			Ok(Some(report)) => report,
			Ok(None) => continue,
			Err(e) => {
				eprintln!("Warning: {e}");
				continue;
			}
		};
		checked += 1;
		if !report.is_clean() {
			flagged += 1;
			println!("{}", describe_report(&workspace, &report));
		}
	}

	println!("{flagged} of {checked} files need fixing.");
	Ok(if flagged == 0 {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn describe_report(workspace: &Workspace, report: &FileReport) -> String {
	let mut problems = Vec::new();
	if report.needs_conversion {
		let expected = &report.expected;
		let mut origin = expected.result.source.to_string();
		if let Some(ref detail) = expected.override_detail
			&& expected.result.source == ExpectedSource::Override
		{
			origin = format!("{origin}: {detail}");
		} else if let Some(ref source) = expected.editorconfig_source
			&& expected.result.source == ExpectedSource::EditorConfig
		{
			origin = format!("{origin}: {}", source.display());
		}
		problems.push(format!(
			"{} but expected {} ({origin})",
			current_label(&report.stats),
			expected.result.expected
		));
	}
	if report.missing_final_newline {
		problems.push("missing final newline".to_string());
	}

	format!(
		"{}: {}",
		workspace.relative_path(&report.path),
		problems.join(", ")
	)
}

fn current_label(stats: &EolStats) -> String {
	if stats.is_mixed() {
		return format!(
			"mixed (lf: {}, crlf: {}, cr: {})",
			stats.lf, stats.crlf, stats.cr
		);
	}
	match stats.dominant() {
		Some(kind) => kind.to_string(),
		None => "cr".to_string(),
	}
}

fn handle_fix(paths: &[PathBuf], include_user: bool) -> Result<ExitCode> {
	let workspace = load_workspace(include_user)?;
	let files = workspace
		.collect_files(&target_paths(paths))
		.context("Failed to collect files")?;

	let mut fixed = 0;
	let mut failed = 0;
	for file in &files {
		match workspace.fix_file(file) {
			Ok(FixOutcome::Changed) => {
				fixed += 1;
				println!("fixed {}", workspace.relative_path(file));
			}
			Ok(FixOutcome::Unchanged | FixOutcome::Skipped) => {}
			Err(e) => {
				failed += 1;
				eprintln!("Warning: {e}");
			}
		}
	}

	println!("Fixed {fixed} files.");
	Ok(if failed == 0 {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn handle_config_show(include_user: bool) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = discover_settings(&cwd, include_user).context("Failed to discover settings")?;

	if loaded.is_empty() {
		println!("No settings files found.");
	} else {
		println!("Settings files (in cascade order):\n");
		for entry in &loaded {
			let settings = &entry.settings;
			println!("# Source: {}", entry.path.display());
			println!("# root: {}", settings.root);
			if let Some(expected) = settings.expected_eol {
				println!("  expected-eol: {expected}");
			}
			if let Some(respect) = settings.respect_editorconfig {
				println!("  respect-editorconfig: {respect}");
			}
			if let Some(final_only) = settings.final_newline_only {
				println!("  final-newline-only: {final_only}");
			}
			for pattern in &settings.ignore {
				println!("  ignore: {pattern}");
			}
			for (i, entry) in settings.overrides.iter().enumerate() {
				println!("  Override {}: {} -> {}", i + 1, entry.pattern, entry.eol);
				if let Some(ref description) = entry.description {
					println!("    description: {description}");
				}
			}
			println!();
		}
	}

	let merged = merge_settings(&loaded);
	println!("Effective settings:");
	println!("  expected-eol: {}", merged.expected_eol);
	println!("  respect-editorconfig: {}", merged.respect_editorconfig);
	println!("  final-newline-only: {}", merged.final_newline_only);
	println!("  ignore patterns: {}", merged.ignore.len());
	println!("  overrides: {}", merged.overrides.len());

	if include_user && let Ok(user_path) = user_settings_path() {
		println!("\nUser settings path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(include_user: bool) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_settings(&cwd, include_user) {
		Ok(loaded) => {
			if loaded.is_empty() {
				println!("No settings files found.");
			} else {
				println!("All settings files are valid:");
				for entry in &loaded {
					println!(
						"  {} ({} overrides)",
						entry.path.display(),
						entry.settings.overrides.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Settings error: {e}");
			Ok(ExitCode::FAILURE)
		}
	}
}
