use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use document::Document;
use openapi_cppgen::cpp::{write_types, Streams};

/// Generates C++ type declarations from an OpenAPI document.
#[derive(Parser)]
struct Args {
    /// interface description (YAML)
    schema: PathBuf,

    /// output path for type declarations
    header: PathBuf,

    /// optional output path for out-of-line definitions
    source: Option<PathBuf>,

    /// namespace wrapped around the generated types
    #[arg(long)]
    namespace: Option<String>,
}

fn main() -> Result<(), openapi_cppgen::Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let doc = Document::from_file(&args.schema)?;

    let mut out = match &args.source {
        Some(_) => Streams::split(&args.header.display().to_string()),
        None => Streams::combined(),
    };
    write_types(&doc, args.namespace.as_deref(), &mut out)?;

    let (decl, def) = out.into_parts();
    debug!("writing {}", args.header.display());
    fs::write(&args.header, decl)?;
    if let (Some(source), Some(def)) = (&args.source, def) {
        debug!("writing {}", source.display());
        fs::write(source, def)?;
    }

    Ok(())
}
