use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pystructure_lib::{outline_file, outline_files, scan_project, OutlineError, RenderOptions};

/// Show the declaration structure of Python source code.
#[derive(Debug, Parser)]
#[command(name = "pystructure", version, about)]
struct Cli {
    /// Python source file, or a directory to scan for sources
    src_path: PathBuf,

    /// Save result to output file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the structure as JSON
    #[arg(long)]
    json: bool,

    /// Spaces per nesting level (0 to 16)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(0..=16)
    )]
    indent: u8,

    /// Cap the outline at 2000 lines of at most 400 characters
    #[arg(long)]
    cap: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "pystructure failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when some files of a batch failed
fn run(cli: &Cli) -> Result<bool, OutlineError> {
    let options = RenderOptions {
        indent_width: usize::from(cli.indent),
        cap_output: cli.cap,
    };

    if !cli.src_path.exists() {
        return Err(OutlineError::NotFound(cli.src_path.clone()));
    }

    let (text, ok) = if cli.src_path.is_dir() {
        outline_directory(&cli.src_path, options, cli.json)?
    } else {
        let result = outline_file(&cli.src_path, options)?;
        let text = if cli.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.outline
        };
        (text, true)
    };

    match &cli.output {
        Some(path) => {
            debug!(path = %path.display(), "writing output");
            std::fs::write(path, &text).map_err(|e| OutlineError::io(path, e))?;
        }
        None => println!("{}", text),
    }

    Ok(ok)
}

fn outline_directory(
    root: &Path,
    options: RenderOptions,
    json: bool,
) -> Result<(String, bool), OutlineError> {
    let files = scan_project(root)?;
    let results = outline_files(&files, options);
    let ok = results.iter().all(Result::is_ok);

    let display = |path: &Path| {
        path.strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    };

    if json {
        let values: Vec<serde_json::Value> = files
            .iter()
            .zip(&results)
            .map(|(path, result)| match result {
                Ok(result) => serde_json::to_value(result),
                Err(err) => Ok(serde_json::json!({
                    "path": path.to_string_lossy(),
                    "error": err.to_string(),
                })),
            })
            .collect::<Result<_, _>>()?;
        return Ok((serde_json::to_string_pretty(&values)?, ok));
    }

    let sections: Vec<String> = files
        .iter()
        .zip(results)
        .map(|(path, result)| match result {
            Ok(result) if result.outline.is_empty() => format!("# {}", display(path.as_path())),
            Ok(result) => format!("# {}\n{}", display(path.as_path()), result.outline),
            Err(err) => format!("# {}: error: {}", display(path.as_path()), err),
        })
        .collect();

    Ok((sections.join("\n\n"), ok))
}
