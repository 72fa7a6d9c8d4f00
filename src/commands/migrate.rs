use crate::catalog::Catalog;
use crate::io::{output, OutputFormat};
use crate::migration::MigrationAdvisor;
use anyhow::Result;

/// Print a migration guide; unknown names are printed, not returned as errors
pub fn handle_migrate(from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::builtin();
    let outcome = MigrationAdvisor::new(&catalog).guide(from, to);
    output::create_writer(format).write_migration(&outcome)
}
