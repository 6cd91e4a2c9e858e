pub mod barangays;
pub mod benefit_programs;
pub mod document_types;
pub mod issue_categories;
pub mod municipalities;
pub mod provinces;

pub use barangays::Entity as Barangays;
pub use barangays::Model as Barangay;
pub use benefit_programs::Entity as BenefitPrograms;
pub use benefit_programs::Model as BenefitProgram;
pub use document_types::Entity as DocumentTypes;
pub use document_types::Model as DocumentType;
pub use issue_categories::Entity as IssueCategories;
pub use issue_categories::Model as IssueCategory;
pub use municipalities::Entity as Municipalities;
pub use municipalities::Model as Municipality;
pub use provinces::Entity as Provinces;
pub use provinces::Model as Province;
