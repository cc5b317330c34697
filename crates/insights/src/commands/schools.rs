//! School command handlers.

use insights_api::{InsightsClient, School, SchoolQuery};
use tabled::Tabled;

use crate::cli::{GlobalOpts, SchoolsArgs, SchoolsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SchoolRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Short Name")]
    short_name: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&School> for SchoolRow {
    fn from(s: &School) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            short_name: s.short_name.clone(),
            active: if s.activated { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(s: &School) -> String {
    [
        format!("ID:          {}", s.id),
        format!("Name:        {}", s.name),
        format!("Short name:  {}", s.short_name),
        format!("Activated:   {}", s.activated),
        format!("Activated at: {}", s.activated_at),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    client: &InsightsClient,
    args: SchoolsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SchoolsCommand::List {
            short_name,
            limit,
            status,
        } => {
            let query = SchoolQuery {
                limit,
                activated_status: status,
                short_name,
            };
            let page = client.list_schools(&query)?;
            let out = output::render_list(
                &global.output,
                &page.data,
                |s| SchoolRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            output::print_next_url(page.next_url.as_deref(), global.quiet);
            Ok(())
        }

        SchoolsCommand::Get { id } => {
            let school = client.get_school(&id)?;
            let out = output::render_single(&global.output, &school, detail, |s| s.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
