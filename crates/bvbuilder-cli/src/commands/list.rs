//! Implementation of the `bvbuilder list` command.

use bvbuilder_core::application::{TemplateInfo, TemplateService};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::generate::build_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = TemplateService::new(Box::new(build_store(config)?));
    let templates = service.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for line in table_rows(&templates) {
                output.print(&line)?;
            }
        }

        // JSON bypasses quiet mode: it must stay parseable in pipes.
        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for t in &templates {
                output.print(&t.id)?;
            }
        }
    }

    Ok(())
}

fn table_rows(templates: &[TemplateInfo]) -> Vec<String> {
    let width = templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| format!("  {:<width$}  {}", t.id, t.origin))
        .collect()
}
