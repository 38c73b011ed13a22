//! Rendering for the command line tool.
//!
//! Kept out of the binary so the output can be tested.

pub mod style;

use crate::assignments::Role;
use crate::entity::OrganizationalEntity;
use crate::resolver::ResolutionReport;
use crate::task::Task;

use style::{dimmed, group, settings_line, title, user};

fn entity_line(entity: &OrganizationalEntity) -> String {
    match entity {
        OrganizationalEntity::User(id) => format!("    {} {}", dimmed("user "), user(id)),
        OrganizationalEntity::Group(id) => format!("    {} {}", dimmed("group"), group(id)),
    }
}

/// Per-role listing of a resolved task followed by a short summary.
pub fn render_task(task: &Task, report: &ResolutionReport) -> String {
    let mut lines = Vec::new();

    match task.people_assignments.as_ref() {
        Some(assignments) => {
            for role in Role::ALL {
                let list = assignments.list(role);
                lines.push(format!("{} ({})", title(role.title()), list.len()));
                if list.is_empty() {
                    lines.push(format!("    {}", dimmed("none")));
                }
                lines.extend(list.iter().map(entity_line));
            }
        }
        None => lines.push(dimmed("No people assignments").to_string()),
    }

    lines.push(String::new());
    let created_by = task
        .created_by()
        .map(|e| e.id().to_string())
        .unwrap_or_else(|| "-".to_string());
    lines.push(settings_line("created by", &created_by));
    lines.push(settings_line("added", &report.total_added().to_string()));
    lines.push(settings_line("duplicates", &report.total_duplicates().to_string()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AssignmentResolver;
    use crate::work_item::{ACTOR_ID, GROUP_ID, WorkItem};

    #[test]
    fn renders_roles_and_summary() {
        colored::control::set_override(false);

        let item = WorkItem::new()
            .with_parameter(ACTOR_ID, "espiegelberg, drbug, drbug")
            .with_parameter(GROUP_ID, "Software Developers");
        let mut task = Task::new();
        let report = AssignmentResolver::default().resolve_all(&item, &mut task);

        let out = render_task(&task, &report);
        assert!(out.contains("Potential owners (3)"));
        assert!(out.contains("user  espiegelberg"));
        assert!(out.contains("group Software Developers"));
        assert!(out.contains("Business administrators (1)"));
        assert!(out.contains("Recipients (0)"));
        assert!(out.contains("created by      espiegelberg"));
        assert!(out.contains("duplicates      1"));
    }

    #[test]
    fn renders_task_without_record() {
        colored::control::set_override(false);
        let out = render_task(&Task::new(), &ResolutionReport::default());
        assert!(out.contains("No people assignments"));
        assert!(out.contains("created by      -"));
    }
}
