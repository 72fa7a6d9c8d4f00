use crate::catalog::{Catalog, Category};
use crate::io::{output, OutputFormat};
use anyhow::Result;

pub fn handle_list(category: Option<Category>, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::builtin();
    let protocols = catalog.list(category);
    output::create_writer(format).write_catalog(&protocols)
}
