//! The master-data node: clients, employees, addressees and lookup tables.

use datevconnect_core::Transport;

use super::ConnectNode;
use crate::descriptor::{ParameterDescriptor, ParameterKind};
use crate::error::NodeError;
use crate::handlers::{master_data as handlers, ItemContext};
use crate::operation::{Operation, ResourceKind};
use crate::params;
use crate::record::OutputRecord;

use Operation::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterDataResource {
    Client,
    ClientCategoryType,
    ClientGroupType,
    Employee,
    Addressee,
    Relationship,
    RelationshipType,
    LegalForm,
    CorporateStructure,
    CountryCode,
    Bank,
    TaxAuthority,
    AreaOfResponsibility,
}

impl ResourceKind for MasterDataResource {
    const ALL: &'static [Self] = &[
        MasterDataResource::Client,
        MasterDataResource::ClientCategoryType,
        MasterDataResource::ClientGroupType,
        MasterDataResource::Employee,
        MasterDataResource::Addressee,
        MasterDataResource::Relationship,
        MasterDataResource::RelationshipType,
        MasterDataResource::LegalForm,
        MasterDataResource::CorporateStructure,
        MasterDataResource::CountryCode,
        MasterDataResource::Bank,
        MasterDataResource::TaxAuthority,
        MasterDataResource::AreaOfResponsibility,
    ];

    fn name(self) -> &'static str {
        match self {
            MasterDataResource::Client => "client",
            MasterDataResource::ClientCategoryType => "clientCategoryType",
            MasterDataResource::ClientGroupType => "clientGroupType",
            MasterDataResource::Employee => "employee",
            MasterDataResource::Addressee => "addressee",
            MasterDataResource::Relationship => "relationship",
            MasterDataResource::RelationshipType => "relationshipType",
            MasterDataResource::LegalForm => "legalForm",
            MasterDataResource::CorporateStructure => "corporateStructure",
            MasterDataResource::CountryCode => "countryCode",
            MasterDataResource::Bank => "bank",
            MasterDataResource::TaxAuthority => "taxAuthority",
            MasterDataResource::AreaOfResponsibility => "areaOfResponsibility",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            MasterDataResource::Client => "Client",
            MasterDataResource::ClientCategoryType => "Client Category Type",
            MasterDataResource::ClientGroupType => "Client Group Type",
            MasterDataResource::Employee => "Employee",
            MasterDataResource::Addressee => "Addressee",
            MasterDataResource::Relationship => "Relationship",
            MasterDataResource::RelationshipType => "Relationship Type",
            MasterDataResource::LegalForm => "Legal Form",
            MasterDataResource::CorporateStructure => "Corporate Structure",
            MasterDataResource::CountryCode => "Country Code",
            MasterDataResource::Bank => "Bank",
            MasterDataResource::TaxAuthority => "Tax Authority",
            MasterDataResource::AreaOfResponsibility => "Area of Responsibility",
        }
    }

    fn operations(self) -> &'static [Operation] {
        match self {
            MasterDataResource::Client => &[
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
            ],
            MasterDataResource::ClientCategoryType
            | MasterDataResource::ClientGroupType
            | MasterDataResource::Employee
            | MasterDataResource::Relationship => &[GetAll, Get, Create, Update],
            MasterDataResource::Addressee => &[GetAll, Get, Create, Update, GetDeletionLog],
            MasterDataResource::CorporateStructure => {
                &[GetAll, Get, GetEstablishment, UpdateEstablishment]
            }
            MasterDataResource::RelationshipType
            | MasterDataResource::LegalForm
            | MasterDataResource::CountryCode
            | MasterDataResource::Bank
            | MasterDataResource::TaxAuthority
            | MasterDataResource::AreaOfResponsibility => &[GetAll],
        }
    }
}

pub struct MasterDataNode;

impl ConnectNode for MasterDataNode {
    type Resource = MasterDataResource;

    const NAME: &'static str = "datevConnectMasterData";
    const DISPLAY_NAME: &'static str = "DATEVconnect Master Data";

    fn parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::new("clientId", "Client ID", ParameterKind::String, "Client the operation applies to"),
            ParameterDescriptor::new(
                "clientCategoryTypeId",
                "Client Category Type ID",
                ParameterKind::String,
                "Client category type to fetch or update",
            ),
            ParameterDescriptor::new(
                "clientGroupTypeId",
                "Client Group Type ID",
                ParameterKind::String,
                "Client group type to fetch or update",
            ),
            ParameterDescriptor::new("employeeId", "Employee ID", ParameterKind::String, "Employee to fetch or update"),
            ParameterDescriptor::new("addresseeId", "Addressee ID", ParameterKind::String, "Addressee to fetch or update"),
            ParameterDescriptor::new(
                "relationshipId",
                "Relationship ID",
                ParameterKind::String,
                "Relationship to fetch or update",
            ),
            ParameterDescriptor::new(
                "organizationId",
                "Organization ID",
                ParameterKind::String,
                "Organization of a corporate structure",
            ),
            ParameterDescriptor::new(
                "establishmentId",
                "Establishment ID",
                ParameterKind::String,
                "Establishment within the organization",
            ),
            ParameterDescriptor::new(
                "nationalRight",
                "National Right",
                ParameterKind::String,
                "Only legal forms under this national right",
            ),
            ParameterDescriptor::new(
                "maxNumber",
                "Max Number",
                ParameterKind::Number,
                "Maximum number of deletion log entries",
            ),
            ParameterDescriptor::new("start", "Start", ParameterKind::Number, "First client number to consider")
                .with_default(serde_json::json!(params::DEFAULT_START)),
            ParameterDescriptor::new("range", "Range", ParameterKind::Number, "How many numbers to search"),
        ]
    }

    fn dispatch<T: Transport>(
        resource: MasterDataResource,
        operation: &str,
        ctx: &ItemContext<'_, T>,
        sink: &mut Vec<OutputRecord>,
    ) -> Result<(), NodeError> {
        match resource {
            MasterDataResource::Client => handlers::client(operation, ctx, sink),
            MasterDataResource::ClientCategoryType => handlers::client_category_type(operation, ctx, sink),
            MasterDataResource::ClientGroupType => handlers::client_group_type(operation, ctx, sink),
            MasterDataResource::Employee => handlers::employee(operation, ctx, sink),
            MasterDataResource::Addressee => handlers::addressee(operation, ctx, sink),
            MasterDataResource::Relationship => handlers::relationship(operation, ctx, sink),
            MasterDataResource::RelationshipType => handlers::relationship_type(operation, ctx, sink),
            MasterDataResource::LegalForm => handlers::legal_form(operation, ctx, sink),
            MasterDataResource::CorporateStructure => handlers::corporate_structure(operation, ctx, sink),
            MasterDataResource::CountryCode => handlers::country_code(operation, ctx, sink),
            MasterDataResource::Bank => handlers::bank(operation, ctx, sink),
            MasterDataResource::TaxAuthority => handlers::tax_authority(operation, ctx, sink),
            MasterDataResource::AreaOfResponsibility => handlers::area_of_responsibility(operation, ctx, sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_tables_only_list() {
        assert_eq!(MasterDataResource::Bank.operations(), &[GetAll]);
        assert!(!MasterDataResource::LegalForm.supports(Create));
        assert!(MasterDataResource::Client.supports(GetNextFreeNumber));
    }

    #[test]
    fn descriptor_includes_common_parameters() {
        let descriptor = MasterDataNode::descriptor();
        let names: Vec<_> = descriptor.parameters.iter().map(|p| p.name).collect();
        assert!(names.starts_with(&["resource", "operation", "top", "skip"]));
        assert!(names.contains(&"nationalRight"));
        assert_eq!(descriptor.credentials, "datevConnectApi");
    }
}
