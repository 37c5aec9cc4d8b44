//! Tag listing command implementation

use crate::api::connect;
use crate::commands::{project_scope, report};
use crate::error::CliResult;
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use simpleflags_compiler::model::Tag;
use simpleflags_compiler::AdminApi;

pub struct Options {
    pub account: Option<String>,
    pub project: Option<String>,
    pub format: String,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let format = OutputFormat::from_str(&options.format)?;
    let settings = Settings::load()?;
    let scope = project_scope(
        &settings,
        options.account.as_deref(),
        options.project.as_deref(),
    )?;
    let tags = connect(&settings)?.get_tags(&scope, None)?;
    print_listing(format, &tags, || tag_table(&tags))
}

fn tag_table(tags: &[Tag]) -> Table {
    let mut table = Table::new(["Identifier", "Name", "Flags"]);
    for tag in tags {
        table.row([
            tag.identifier.clone(),
            tag.name.clone(),
            tag.flags.join(", "),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_joins_flags() {
        let tags = vec![Tag {
            identifier: "beta".to_string(),
            name: "Beta".to_string(),
            flags: vec!["dark-mode".to_string(), "new-nav".to_string()],
        }];
        assert!(tag_table(&tags).render().contains("dark-mode, new-nav"));
    }
}
