//! Write the OpenAPI document as pretty JSON to stdout.

use std::io::Write;

use color_eyre::eyre::Result;
use shops::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi().to_pretty_json()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
