//! `orgchart tree` and `orgchart summary`.

use std::path::Path;

use anyhow::Result;

use org::model::NodeData;
use org::{build_hierarchy, summarize, Employee, HierarchyNode, OrgSummary, PlacementPolicy, Team};

/// Build and print the org chart.
pub fn tree(
    employees: &[Employee],
    team: Option<&str>,
    output_json: bool,
    policy: &PlacementPolicy,
) -> Result<()> {
    org::service::check_unique_ids(employees)?;
    let tree = build_hierarchy(employees, policy);
    let tree = match (tree, team) {
        (Some(t), Some(label)) => {
            let Some(team) = Team::from_label(label) else {
                anyhow::bail!(
                    "Unknown team '{}'. Expected one of: {}.",
                    label,
                    Team::ALL.map(Team::label).join(", ")
                );
            };
            match t.retain_team(team) {
                Some(pruned) => Some(pruned),
                None => anyhow::bail!("No employees on team {}.", team),
            }
        }
        (tree, _) => tree,
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    match tree {
        Some(t) => print!("{}", render_tree(&t)),
        None => println!(
            "No {} found among {} employees; nothing to chart.",
            policy.root_role,
            employees.len()
        ),
    }
    Ok(())
}

/// Print headcount figures.
pub fn summary(employees: &[Employee], output_json: bool, policy: &PlacementPolicy) -> Result<()> {
    org::service::check_unique_ids(employees)?;
    let summary = summarize(employees, policy);
    if output_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }
    Ok(())
}

/// Indented box-drawing rendering, one node per line.
pub fn render_tree(root: &HierarchyNode) -> String {
    let mut out = format!("{}\n", node_label(root));
    render_children(root, "", &mut out);
    out
}

fn render_children(node: &HierarchyNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&node_label(child));
        out.push('\n');
        render_children(child, &format!("{}{}", prefix, indent), out);
    }
}

fn node_label(node: &HierarchyNode) -> String {
    match &node.data {
        NodeData::Employee(d) => {
            let e = &d.employee;
            let mut label = if e.role.trim().is_empty() {
                e.name.clone()
            } else {
                format!("{} ({})", e.name, e.role.trim())
            };
            if let Some(p) = &e.current_project {
                label.push_str(&format!(" @{}", p.title()));
            }
            label
        }
        NodeData::Group(g) => format!("[{}]", g.label),
    }
}

pub fn render_summary(s: &OrgSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Employees:   {}\n", s.total));
    out.push_str(&format!("On bench:    {}\n", s.on_bench));
    out.push_str(&format!("Available:   {}\n", s.available));
    out.push_str(&format!("Team leads:  {}\n", s.team_leads));
    out.push_str(&format!("Projects:    {}\n", s.projects));

    out.push_str(&format!("\n{:16} {:>9} {:>6}\n", "TEAM", "HEADCOUNT", "BENCH"));
    for (team, t) in &s.by_team {
        out.push_str(&format!("{:16} {:>9} {:>6}\n", team.label(), t.headcount, t.on_bench));
    }

    out.push_str(&format!("\n{:16} {:>9}\n", "ROLE", "COUNT"));
    for (role, n) in &s.by_role {
        out.push_str(&format!("{:16} {:>9}\n", role, n));
    }
    out
}

/// Load employees and policy from the CLI arguments.
pub fn inputs(
    file: Option<&Path>,
    policy_flag: Option<&Path>,
    client_config_path: &Path,
) -> Result<(Vec<Employee>, PlacementPolicy)> {
    let config = crate::config::ClientConfig::load(client_config_path)?;
    let policy = config.resolve_policy(policy_flag)?;
    let employees = crate::commands::roster::load(file, client_config_path)?;
    Ok((employees, policy))
}
