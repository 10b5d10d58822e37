use serde::{Deserialize, Serialize};

use super::{Employee, Team};

/// One node of the org chart tree handed to the rendering widget.
///
/// The wire shape is `{name, data, children}` with a flat `data` bag, which
/// is what tree widgets consume directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    pub data: NodeData,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

/// Payload of a node: either a real employee or a synthetic grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Employee(EmployeeData),
    Group(GroupData),
}

/// Keys the node payload owns. Source records can't override them.
const RESERVED_KEYS: [&str; 2] = ["kind", "color"];

/// Source employee record plus its derived display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeData {
    #[serde(flatten)]
    pub employee: Employee,
    pub color: String,
}

/// Synthetic node with no employee behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    pub group: GroupKind,
    pub label: String,
    pub team: Team,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Stands in for a team whose head isn't in the directory.
    Department,
    /// Buckets individual contributors sharing a role, e.g. "Developer Team".
    RoleGroup,
    /// Holds employees not allocated to a project.
    Bench,
}

/// Shape counters for a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub employees: usize,
    pub groups: usize,
    pub depth: usize,
}

impl NodeData {
    pub fn as_employee(&self) -> Option<&Employee> {
        match self {
            NodeData::Employee(d) => Some(&d.employee),
            NodeData::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupData> {
        match self {
            NodeData::Group(g) => Some(g),
            NodeData::Employee(_) => None,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            NodeData::Employee(d) => &d.color,
            NodeData::Group(g) => &g.color,
        }
    }

    pub fn team(&self) -> Team {
        match self {
            NodeData::Employee(d) => d.employee.team(),
            NodeData::Group(g) => g.team,
        }
    }
}

impl HierarchyNode {
    pub fn employee(mut employee: Employee, color: impl Into<String>) -> Self {
        for key in RESERVED_KEYS {
            employee.extra.remove(key);
        }
        Self {
            name: employee.name.clone(),
            data: NodeData::Employee(EmployeeData {
                employee,
                color: color.into(),
            }),
            children: Vec::new(),
        }
    }

    pub fn group(kind: GroupKind, label: impl Into<String>, team: Team, color: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            data: NodeData::Group(GroupData {
                group: kind,
                label,
                team,
                color: color.into(),
            }),
            children: Vec::new(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.data, NodeData::Group(_))
    }

    /// Employee ids in pre-order.
    pub fn employee_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.walk(&mut |node| {
            if let Some(e) = node.data.as_employee() {
                ids.push(e.id.as_str());
            }
        });
        ids
    }

    /// Find the node holding the employee with the given id.
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.data.as_employee().is_some_and(|e| e.id == id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of levels, counting this node as 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::depth).max().unwrap_or(0)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            depth: self.depth(),
            ..TreeStats::default()
        };
        self.walk(&mut |node| {
            stats.nodes += 1;
            if node.is_group() {
                stats.groups += 1;
            } else {
                stats.employees += 1;
            }
        });
        stats
    }

    /// Prune the tree to the nodes belonging to `team` and the path from the
    /// root down to them. Returns `None` if no node in the tree is on `team`.
    pub fn retain_team(&self, team: Team) -> Option<HierarchyNode> {
        let children: Vec<HierarchyNode> = self
            .children
            .iter()
            .filter_map(|c| c.retain_team(team))
            .collect();
        if children.is_empty() && self.data.team() != team {
            return None;
        }
        Some(HierarchyNode {
            name: self.name.clone(),
            data: self.data.clone(),
            children,
        })
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a HierarchyNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}
