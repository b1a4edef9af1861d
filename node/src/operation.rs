//! Operations and the resource vocabulary shared by both nodes.

use serde::Serialize;

/// An action on a resource, identified on the wire by its camelCase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GetAll,
    Get,
    Create,
    Update,
    GetCategories,
    UpdateCategories,
    GetGroups,
    UpdateGroups,
    GetDeletionLog,
    GetNextFreeNumber,
    GetEstablishment,
    UpdateEstablishment,
    GetCondensed,
    GetUtilized,
    GetNextAvailable,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::GetAll,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::GetCategories,
        Operation::UpdateCategories,
        Operation::GetGroups,
        Operation::UpdateGroups,
        Operation::GetDeletionLog,
        Operation::GetNextFreeNumber,
        Operation::GetEstablishment,
        Operation::UpdateEstablishment,
        Operation::GetCondensed,
        Operation::GetUtilized,
        Operation::GetNextAvailable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetAll => "getAll",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::GetCategories => "getCategories",
            Operation::UpdateCategories => "updateCategories",
            Operation::GetGroups => "getGroups",
            Operation::UpdateGroups => "updateGroups",
            Operation::GetDeletionLog => "getDeletionLog",
            Operation::GetNextFreeNumber => "getNextFreeNumber",
            Operation::GetEstablishment => "getEstablishment",
            Operation::UpdateEstablishment => "updateEstablishment",
            Operation::GetCondensed => "getCondensed",
            Operation::GetUtilized => "getUtilized",
            Operation::GetNextAvailable => "getNextAvailable",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Operation::GetAll => "Get Many",
            Operation::Get => "Get",
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::GetCategories => "Get Categories",
            Operation::UpdateCategories => "Update Categories",
            Operation::GetGroups => "Get Groups",
            Operation::UpdateGroups => "Update Groups",
            Operation::GetDeletionLog => "Get Deletion Log",
            Operation::GetNextFreeNumber => "Get Next Free Number",
            Operation::GetEstablishment => "Get Establishment",
            Operation::UpdateEstablishment => "Update Establishment",
            Operation::GetCondensed => "Get Condensed",
            Operation::GetUtilized => "Get Utilized",
            Operation::GetNextAvailable => "Get Next Available",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

/// A resource enum of one node.
pub trait ResourceKind: Copy + Eq + 'static {
    const ALL: &'static [Self];

    /// Wire name, e.g. `"accountPosting"`.
    fn name(self) -> &'static str;

    fn display_name(self) -> &'static str;

    /// Operations the resource supports, in UI order.
    fn operations(self) -> &'static [Operation];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.name() == name)
    }

    fn supports(self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(*op));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(Operation::from_name("GetAll"), None);
        assert_eq!(Operation::from_name(""), None);
    }

    #[test]
    fn serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_value(Operation::GetNextFreeNumber).unwrap(),
            serde_json::json!("getNextFreeNumber")
        );
    }
}
