use crate::catalog::Catalog;
use crate::io::{output, OutputFormat};
use anyhow::Result;

pub fn handle_compare(protocols: &[String], format: OutputFormat) -> Result<()> {
    let comparison = Catalog::builtin().compare(protocols);
    let unresolved = comparison.iter().filter(|(_, e)| e.is_error()).count();
    if unresolved > 0 {
        tracing::debug!("{} protocol names did not resolve", unresolved);
    }
    output::create_writer(format).write_comparison(&comparison)
}
