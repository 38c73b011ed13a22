use anyhow::{Context, Result};
use clap::Parser;
use people_assign::build_info::build_info;
use people_assign::cli::render_task;
use people_assign::cli::style::{error, title, version};
use people_assign::entity::ADMINISTRATOR_ID;
use people_assign::models::ResolveResponse;
use people_assign::resolver::{AssignmentResolver, ResolverConfig};
use people_assign::task::Task;
use people_assign::work_item::WorkItem;

#[derive(Parser, Debug)]
#[clap(
    name = "people-assign-cli",
    about = "Resolve work item people assignments locally"
)]
struct Cli {
    /// Users that may claim the task; the first becomes its creator
    #[arg(long)]
    actor_id: Option<String>,
    /// Groups that may claim the task
    #[arg(long)]
    group_id: Option<String>,
    /// Users added after the default administrator
    #[arg(long)]
    business_administrator_id: Option<String>,
    #[arg(long)]
    task_stakeholder_id: Option<String>,
    #[arg(long)]
    excluded_owner_id: Option<String>,
    #[arg(long)]
    recipient_id: Option<String>,
    /// Default administrator
    #[arg(long, default_value = ADMINISTRATOR_ID, env = "PEOPLE_ASSIGN_ADMINISTRATOR")]
    administrator: String,
    /// Character separating IDs inside one value
    #[arg(long, default_value = ",", env = "PEOPLE_ASSIGN_SEPARATOR")]
    separator: char,
    /// Print the resolved task as JSON
    #[arg(long, env = "PEOPLE_ASSIGN_JSON")]
    json: bool,
}

impl Cli {
    fn work_item(&self, config: &ResolverConfig) -> WorkItem {
        let keys = &config.keys;
        let mut item = WorkItem::new();
        for (key, value) in [
            (&keys.actor_id, &self.actor_id),
            (&keys.group_id, &self.group_id),
            (&keys.business_administrator_id, &self.business_administrator_id),
            (&keys.task_stakeholder_id, &self.task_stakeholder_id),
            (&keys.excluded_owner_id, &self.excluded_owner_id),
            (&keys.recipient_id, &self.recipient_id),
        ] {
            if let Some(value) = value {
                item.set_parameter(key.as_str(), value.as_str());
            }
        }
        item
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ResolverConfig {
        administrator: cli.administrator.clone(),
        separator: cli.separator,
        ..ResolverConfig::default()
    };
    let resolver = AssignmentResolver::new(config).context("invalid resolver settings")?;
    let item = cli.work_item(resolver.config());

    let mut task = Task::new();
    let report = resolver.resolve_all(&item, &mut task);

    if cli.json {
        let response = ResolveResponse { task, report };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "{} {}",
            title("people-assign"),
            version(&build_info().version)
        );
        println!("{}", render_task(&task, &report));
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {:#}", error("error:"), e);
        std::process::exit(1);
    }
}
