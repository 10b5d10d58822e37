//! Flat employee list -> org chart tree.
//!
//! Placement, top to bottom:
//!
//! 1. The first root-role holder (the CEO) is the root. No root, no tree.
//! 2. Executives (and any further root-role holders) hang off the root.
//! 3. Everyone else is bucketed by team. Each team hangs from an anchor:
//!    the root for the Executive team, the team's head executive when one
//!    is present, otherwise a synthetic department node under the root.
//! 4. Inside a team: senior managers under the anchor, managers under a
//!    senior manager, project team leads under a manager, project members
//!    under their lead, loose contributors under a manager, bench members
//!    in a bench group under a manager. Missing tiers collapse upward.
//!
//! When several nodes qualify as parent, the one sharing the child's
//! current project wins, then the first in input order.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::model::{Employee, GroupKind, HierarchyNode, Team};
use crate::policy::PlacementPolicy;

/// Build the org chart for `employees` under `policy`.
///
/// Returns `None` when nobody holds the root role, including for an empty
/// list. Every employee appears exactly once in a returned tree.
pub fn build_hierarchy(employees: &[Employee], policy: &PlacementPolicy) -> Option<HierarchyNode> {
    HierarchyBuilder::new(policy).build(employees)
}

pub struct HierarchyBuilder<'p> {
    policy: &'p PlacementPolicy,
}

impl<'p> HierarchyBuilder<'p> {
    pub fn new(policy: &'p PlacementPolicy) -> Self {
        Self { policy }
    }

    pub fn build(&self, employees: &[Employee]) -> Option<HierarchyNode> {
        let Some(root_pos) = employees.iter().position(|e| self.policy.is_root(e)) else {
            debug!(
                employees = employees.len(),
                root_role = %self.policy.root_role,
                "no root employee, nothing to build"
            );
            return None;
        };

        let mut arena = Arena::default();
        let root = arena.add(
            None,
            HierarchyNode::employee(employees[root_pos].clone(), self.policy.color(Team::Executive)),
        );

        let mut executives: Vec<(usize, &Employee)> = Vec::new();
        let mut teams: BTreeMap<Team, Vec<&Employee>> = BTreeMap::new();
        for (pos, e) in employees.iter().enumerate() {
            if pos == root_pos {
                continue;
            }
            if self.policy.is_root(e) {
                warn!(id = %e.id, name = %e.name, "extra root-role holder, placing as executive");
            }
            if self.policy.is_root(e) || self.policy.is_executive(e) {
                executives.push((arena.add(Some(root), self.employee_node(e)), e));
                continue;
            }
            let team = e.team();
            if team == Team::Other && !e.team.trim().eq_ignore_ascii_case("other") {
                debug!(id = %e.id, team = %e.team, "unrecognized team, bucketing as Other");
            }
            teams.entry(team).or_default().push(e);
        }

        for (team, members) in &teams {
            let anchor = self.anchor(&mut arena, root, *team, &executives);
            self.place_team(&mut arena, anchor, *team, members);
        }

        let tree = arena.into_tree();
        debug!(employees = employees.len(), teams = teams.len(), "hierarchy built");
        tree
    }

    /// Node a team's subtree hangs from.
    fn anchor(
        &self,
        arena: &mut Arena,
        root: usize,
        team: Team,
        executives: &[(usize, &Employee)],
    ) -> usize {
        if team == Team::Executive {
            return root;
        }
        if let Some(role) = self.policy.head_role(team) {
            if let Some((idx, _)) = executives.iter().find(|(_, e)| e.has_role(role)) {
                return *idx;
            }
        }
        debug!(team = %team, "no team head, adding department node");
        arena.add(
            Some(root),
            HierarchyNode::group(GroupKind::Department, team.label(), team, self.policy.color(team)),
        )
    }

    fn place_team<'e>(&self, arena: &mut Arena, anchor: usize, team: Team, members: &[&'e Employee]) {
        let segregate = self.policy.segregates_bench(team);

        let mut senior = Vec::new();
        let mut managers = Vec::new();
        let mut leads = Vec::new();
        let mut bench = Vec::new();
        let mut rest = Vec::new();
        for &e in members {
            let benched = segregate && e.is_on_bench;
            match self.policy.management_tier(e) {
                Some(0) => senior.push(e),
                Some(_) => managers.push(e),
                None if self.policy.is_team_lead(e) && e.project_key().is_some() && !benched => {
                    leads.push(e)
                }
                None if benched => bench.push(e),
                None => rest.push(e),
            }
        }

        let senior = self.attach_all(arena, &senior, |_| anchor);
        let managers = self.attach_all(arena, &managers, |e| pick(&senior, e).unwrap_or(anchor));
        if senior.is_empty() && !managers.is_empty() {
            debug!(team = %team, "no senior manager tier, managers attach to team anchor");
        }

        let deepest = if managers.is_empty() { &senior } else { &managers };
        let lead_parent = |e: &Employee| pick(deepest, e).unwrap_or(anchor);

        let leads = self.attach_all(arena, &leads, &lead_parent);

        let mut role_groups: HashMap<(usize, String), usize> = HashMap::new();
        for e in rest {
            let project_lead = e
                .project_key()
                .and_then(|key| leads.iter().find(|(_, l)| l.project_key() == Some(key)));
            if let Some((lead, _)) = project_lead {
                arena.add(Some(*lead), self.employee_node(e));
                continue;
            }

            let base = lead_parent(e);
            let role = e.role.trim();
            let parent = if self.policy.group_by_role && !role.is_empty() {
                *role_groups
                    .entry((base, role.to_ascii_lowercase()))
                    .or_insert_with(|| {
                        arena.add(
                            Some(base),
                            HierarchyNode::group(
                                GroupKind::RoleGroup,
                                self.policy.role_group_label(role),
                                team,
                                self.policy.color(team),
                            ),
                        )
                    })
            } else {
                base
            };
            arena.add(Some(parent), self.employee_node(e));
        }

        let mut bench_groups: HashMap<usize, usize> = HashMap::new();
        for e in bench {
            let parent = lead_parent(e);
            let group = *bench_groups.entry(parent).or_insert_with(|| {
                arena.add(
                    Some(parent),
                    HierarchyNode::group(
                        GroupKind::Bench,
                        self.policy.bench_label.clone(),
                        team,
                        self.policy.color(team),
                    ),
                )
            });
            arena.add(Some(group), self.employee_node(e));
        }
    }

    fn attach_all<'e>(
        &self,
        arena: &mut Arena,
        members: &[&'e Employee],
        parent_of: impl Fn(&Employee) -> usize,
    ) -> Vec<(usize, &'e Employee)> {
        members
            .iter()
            .map(|&e| (arena.add(Some(parent_of(e)), self.employee_node(e)), e))
            .collect()
    }

    fn employee_node(&self, e: &Employee) -> HierarchyNode {
        HierarchyNode::employee(e.clone(), self.policy.color(e.team()))
    }
}

/// Parent among `candidates` for `e`: same project first, then input order.
fn pick(candidates: &[(usize, &Employee)], e: &Employee) -> Option<usize> {
    e.project_key()
        .and_then(|key| candidates.iter().find(|(_, c)| c.project_key() == Some(key)))
        .or_else(|| candidates.first())
        .map(|(idx, _)| *idx)
}

/// Flat node storage with parent links. Parents are always added before
/// their children, so indices grow downward through the tree.
#[derive(Default)]
struct Arena {
    nodes: Vec<HierarchyNode>,
    parents: Vec<Option<usize>>,
}

impl Arena {
    fn add(&mut self, parent: Option<usize>, node: HierarchyNode) -> usize {
        self.nodes.push(node);
        self.parents.push(parent);
        self.nodes.len() - 1
    }

    /// Fold nodes into their parents from the highest index down. Each node
    /// has received all of its children (in reverse) by the time it is
    /// popped.
    fn into_tree(mut self) -> Option<HierarchyNode> {
        while let Some(mut node) = self.nodes.pop() {
            node.children.reverse();
            match self.parents.pop().flatten() {
                Some(parent) => self.nodes[parent].children.push(node),
                None => return Some(node),
            }
        }
        None
    }
}
