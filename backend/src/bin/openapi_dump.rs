//! Print the OpenAPI document.

use std::io::{self, Write};

use clap::Parser;
use status_backend::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for the OpenAPI dump.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the OpenAPI document")]
struct Cli {
    /// Indent the JSON output.
    #[arg(long, conflicts_with = "yaml")]
    pretty: bool,
    /// Emit YAML instead of JSON.
    #[arg(long)]
    yaml: bool,
}

fn render(cli: &Cli) -> io::Result<String> {
    let doc = ApiDoc::openapi();
    if cli.yaml {
        doc.to_yaml().map_err(io::Error::other)
    } else if cli.pretty {
        doc.to_pretty_json().map_err(io::Error::other)
    } else {
        doc.to_json().map_err(io::Error::other)
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let document = render(&cli)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{document}")
}
