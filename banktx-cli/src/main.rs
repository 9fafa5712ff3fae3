//! banktx: convert plain-text bank statement dumps into validated CSV
//! ledgers. Thin shell around banktx-core: walks files, picks the
//! institution profile, writes CSVs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use banktx_core::{export, parse_statement, Institution, Statement};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "banktx", version, about = "Convert plain-text bank statements into CSV ledgers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statement dumps and write CSV ledgers
    Convert {
        /// Statement file or directory of statement files
        path: PathBuf,

        /// Institution format: bofa, bofa-cc or td (default: sniff from file name)
        #[arg(long)]
        institution: Option<String>,

        /// Write every statement into one combined CSV instead of one per statement
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory for per-statement CSV files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert { path, institution, output, out_dir } => {
            convert(&path, institution.as_deref(), output.as_deref(), &out_dir)
        }
    }
}

fn convert(
    path: &Path,
    institution: Option<&str>,
    output: Option<&Path>,
    out_dir: &Path,
) -> Result<()> {
    let forced = match institution {
        Some(name) => match Institution::parse(name) {
            Some(i) => Some(i),
            None => bail!("unknown institution: {name} (expected bofa, bofa-cc or td)"),
        },
        None => None,
    };

    let mut files = Vec::new();
    collect_files(path, &mut files)
        .with_context(|| format!("walking {}", path.display()))?;
    files.sort();
    if files.is_empty() {
        bail!("no statement files under {}", path.display());
    }

    let mut statements: Vec<Statement> = Vec::with_capacity(files.len());
    for file in &files {
        let institution = match forced.or_else(|| sniff(file)) {
            Some(i) => i,
            None => bail!(
                "cannot determine institution for {} (pass --institution)",
                file.display()
            ),
        };

        let text = fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let statement = parse_statement(&text, institution)
            .with_context(|| format!("parsing {}", file.display()))?;

        println!(
            "Parsed {} transactions from {} ({institution})",
            statement.transactions.len(),
            file.display()
        );
        statements.push(statement);
    }

    if let Some(out) = output {
        let file = fs::File::create(out)
            .with_context(|| format!("creating {}", out.display()))?;
        export::write_all_csv(&statements, file)?;
        println!("Wrote {} statements to {}", statements.len(), out.display());
    } else {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        for statement in &statements {
            let target = out_dir.join(export::csv_file_name(statement));
            let file = fs::File::create(&target)
                .with_context(|| format!("creating {}", target.display()))?;
            export::write_csv(statement, file)?;
            println!("Wrote {}", target.display());
        }
    }

    Ok(())
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if path.is_dir() {
        for entry in fs::read_dir(path)? {
            collect_files(&entry?.path(), files)?;
        }
    } else {
        files.push(path.to_path_buf());
    }
    Ok(())
}

fn sniff(file: &Path) -> Option<Institution> {
    file.file_name().and_then(|name| name.to_str()).and_then(Institution::sniff)
}
