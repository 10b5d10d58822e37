mod employee;
mod node;
mod team;

pub use employee::{Employee, ProjectRef};
pub use node::{EmployeeData, GroupData, GroupKind, HierarchyNode, NodeData, TreeStats};
pub use team::Team;
