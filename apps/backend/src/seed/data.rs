//! Fixed reference rows inserted on first start.

use serde_json::json;

use crate::repos::{BenefitProgramDraft, DocumentTypeDraft, IssueCategoryDraft};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn document_types() -> Vec<DocumentTypeDraft> {
    vec![
        DocumentTypeDraft {
            code: "BRGY_CLEARANCE".into(),
            name: "Barangay Clearance".into(),
            description: Some("Certifies that the requester has no derogatory record in the barangay".into()),
            authority_level: "barangay".into(),
            requirements: strings(&["Valid ID", "Proof of residency"]),
            fee: 50.0,
            processing_days: 1,
            supports_physical: true,
            supports_digital: true,
        },
        DocumentTypeDraft {
            code: "CERT_RESIDENCY".into(),
            name: "Certificate of Residency".into(),
            description: Some("Certifies that the requester resides in the barangay".into()),
            authority_level: "barangay".into(),
            requirements: strings(&["Valid ID", "Proof of residency"]),
            fee: 30.0,
            processing_days: 1,
            supports_physical: true,
            supports_digital: true,
        },
        DocumentTypeDraft {
            code: "CERT_INDIGENCY".into(),
            name: "Certificate of Indigency".into(),
            description: Some("Certifies low-income status for assistance programs".into()),
            authority_level: "barangay".into(),
            requirements: strings(&["Valid ID", "Proof of income or affidavit"]),
            fee: 0.0,
            processing_days: 2,
            supports_physical: true,
            supports_digital: true,
        },
        DocumentTypeDraft {
            code: "CEDULA".into(),
            name: "Community Tax Certificate".into(),
            description: Some("Annual community tax certificate (cedula)".into()),
            authority_level: "municipal".into(),
            requirements: strings(&["Valid ID", "Proof of income"]),
            fee: 5.0,
            processing_days: 1,
            supports_physical: true,
            supports_digital: false,
        },
        DocumentTypeDraft {
            code: "BUSINESS_PERMIT".into(),
            name: "Business Permit".into(),
            description: Some("Mayor's permit to operate a business in the municipality".into()),
            authority_level: "municipal".into(),
            requirements: strings(&[
                "DTI or SEC registration",
                "Barangay business clearance",
                "Community Tax Certificate",
                "Lease contract or land title",
            ]),
            fee: 500.0,
            processing_days: 5,
            supports_physical: true,
            supports_digital: false,
        },
    ]
}

pub fn issue_categories() -> Vec<IssueCategoryDraft> {
    [
        ("Infrastructure", "infrastructure", "Roads, bridges, drainage and public buildings", "construction"),
        ("Public Safety", "public-safety", "Crime, hazards and emergency concerns", "shield"),
        ("Environment", "environment", "Waste, pollution and flooding", "leaf"),
        ("Health", "health", "Sanitation and public health concerns", "heart"),
        ("Utilities", "utilities", "Water, electricity and street lights", "bolt"),
        ("Others", "others", "Concerns that fit no other category", "dots"),
    ]
    .into_iter()
    .map(|(name, slug, description, icon)| IssueCategoryDraft {
        name: name.into(),
        slug: slug.into(),
        description: Some(description.into()),
        icon: Some(icon.into()),
    })
    .collect()
}

pub fn benefit_programs() -> Vec<BenefitProgramDraft> {
    vec![
        BenefitProgramDraft {
            name: "Senior Citizen Financial Assistance".into(),
            code: "SENIOR_ASSIST".into(),
            description: "Quarterly cash assistance for residents aged 60 and above".into(),
            program_type: "financial".into(),
            eligibility_criteria: json!({ "min_age": 60, "resident": true }),
            required_documents: strings(&["Senior Citizen ID", "Certificate of Residency"]),
            is_active: true,
            is_accepting_applications: true,
        },
        BenefitProgramDraft {
            name: "Educational Scholarship".into(),
            code: "EDU_SCHOLAR".into(),
            description: "Tuition support for qualified college students".into(),
            program_type: "educational".into(),
            eligibility_criteria: json!({ "max_household_income": 250000, "min_gwa": 85, "resident": true }),
            required_documents: strings(&["Certificate of Enrollment", "Report Card", "Certificate of Indigency"]),
            is_active: true,
            is_accepting_applications: true,
        },
        BenefitProgramDraft {
            name: "Medical Assistance Program".into(),
            code: "MED_ASSIST".into(),
            description: "Help with hospital bills and prescribed medicine".into(),
            program_type: "health".into(),
            eligibility_criteria: json!({ "resident": true, "indigent": true }),
            required_documents: strings(&["Medical Certificate", "Hospital Bill", "Certificate of Indigency"]),
            is_active: true,
            is_accepting_applications: true,
        },
        BenefitProgramDraft {
            name: "Livelihood Starter Kit".into(),
            code: "LIVELIHOOD_KIT".into(),
            description: "Starter equipment for small home-based businesses".into(),
            program_type: "livelihood".into(),
            eligibility_criteria: json!({ "min_age": 18, "resident": true, "unemployed": true }),
            required_documents: strings(&["Valid ID", "Barangay Clearance", "Business Plan"]),
            is_active: true,
            is_accepting_applications: true,
        },
        BenefitProgramDraft {
            name: "PWD Support Program".into(),
            code: "PWD_SUPPORT".into(),
            description: "Assistive devices and allowance for persons with disability".into(),
            program_type: "social".into(),
            eligibility_criteria: json!({ "pwd": true, "resident": true }),
            required_documents: strings(&["PWD ID", "Medical Certificate"]),
            is_active: true,
            is_accepting_applications: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn natural_keys_are_unique() {
        let codes: HashSet<_> = document_types().into_iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), 5);
        let slugs: HashSet<_> = issue_categories().into_iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), 6);
        let programs: HashSet<_> = benefit_programs().into_iter().map(|p| p.code).collect();
        assert_eq!(programs.len(), 5);
    }

    #[test]
    fn eligibility_is_a_structured_predicate() {
        assert!(benefit_programs()
            .iter()
            .all(|p| p.eligibility_criteria.is_object() && !p.required_documents.is_empty()));
    }
}
