//! Apply command implementation
//!
//! The apply command materializes a layout file:
//! 1. Parse the layout (`.scaffold.yaml` by default)
//! 2. Merge the command-line flags into the layout's options
//! 3. Build one file operation per path from its `ops` list
//! 4. Run every operation below the output directory, reporting each decision

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

use scaffold_ops::config::{self, DEFAULT_LAYOUT_FILE};
use scaffold_ops::options::ScaffoldOpts;
use scaffold_ops::output::OutputConfig;
use scaffold_ops::report::{LogReporter, NullReporter, RecordingReporter, Reporter};
use scaffold_ops::structure::{create_structure, Structure};

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the layout file
    #[arg(short, long, value_name = "PATH", env = "SCAFFOLD_OPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite existing files and regenerate skip-on-update files
    #[arg(short, long)]
    pub force: bool,

    /// Treat the output directory as an existing project
    #[arg(short, long)]
    pub update: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long, alias = "dry-run")]
    pub pretend: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl ApplyArgs {
    /// Flags given on the command line switch options on, never off.
    fn merge_options(&self, from_layout: ScaffoldOpts) -> ScaffoldOpts {
        from_layout
            .with_force(from_layout.force || self.force)
            .with_update(from_layout.update || self.update)
            .with_pretend(from_layout.pretend || self.pretend)
    }
}

fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Layout file not found: {path}\n\n\
         hint: Create a {DEFAULT_LAYOUT_FILE} file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set SCAFFOLD_OPS_CONFIG environment variable",
        path = path.display()
    )
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LAYOUT_FILE));
    if !config_path.exists() {
        return Err(config_not_found(&config_path));
    }

    let output_dir = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let layout = config::from_file(&config_path)?;
    let opts = args.merge_options(layout.options);
    let structure = Structure::from_layout(&layout);

    if !args.quiet && opts.pretend {
        println!("🔎 PRETEND MODE - No changes will be made");
        println!();
    }

    let recorder = RecordingReporter::new();
    let log_reporter = LogReporter::new(output.clone());
    let sink: &dyn Reporter = if args.quiet {
        &NullReporter
    } else {
        &log_reporter
    };

    let changed = create_structure(&structure, &output_dir, &opts, &(sink, &recorder))?;

    if !args.quiet {
        let duration = start_time.elapsed();
        println!();
        println!("✅ Applied successfully in {:.2}s", duration.as_secs_f64());
        println!(
            "   {} of {} paths acted on, {} skipped",
            changed.len(),
            structure.len(),
            recorder.count("skip")
        );
        if !opts.pretend && !changed.is_empty() {
            println!("   Files written to: {}", output_dir.display());
        }
    }

    Ok(())
}
