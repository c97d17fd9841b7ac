//! The shipped service package catalog.

use crate::domain::{Frequency, Money, PackageTier, PestType, ServicePackage};

/// Builtin basic/standard/premium packages.
pub fn builtin_catalog() -> Vec<ServicePackage> {
    vec![
        ServicePackage {
            tier: PackageTier::Basic,
            name: "Essential Protection".to_string(),
            description: "Quarterly perimeter treatment for common household pests".to_string(),
            frequency: Frequency::Quarterly,
            features: vec![
                "Exterior perimeter barrier".to_string(),
                "Interior treatment on request".to_string(),
                "Seasonal pest inspection".to_string(),
            ],
            guarantees: vec!["Free re-treatment between visits".to_string()],
            covered_pests: vec![PestType::Ants, PestType::Roaches, PestType::General],
            is_popular: false,
            savings: None,
        },
        ServicePackage {
            tier: PackageTier::Standard,
            name: "Complete Care".to_string(),
            description: "Bi-monthly full-home coverage with rodent monitoring".to_string(),
            frequency: Frequency::BiMonthly,
            features: vec![
                "Interior and exterior treatment".to_string(),
                "Rodent bait station monitoring".to_string(),
                "Web and nest removal".to_string(),
                "Detailed service reports".to_string(),
            ],
            guarantees: vec![
                "Free re-treatment between visits".to_string(),
                "Money-back satisfaction guarantee".to_string(),
            ],
            covered_pests: vec![
                PestType::Ants,
                PestType::Roaches,
                PestType::Rodents,
                PestType::General,
            ],
            is_popular: true,
            savings: Some(Money::cents(12000)),
        },
        ServicePackage {
            tier: PackageTier::Premium,
            name: "Total Shield".to_string(),
            description: "Monthly whole-property defense including mosquito and termite watch"
                .to_string(),
            frequency: Frequency::Monthly,
            features: vec![
                "Interior and exterior treatment".to_string(),
                "Mosquito yard treatment in season".to_string(),
                "Annual termite inspection".to_string(),
                "Rodent bait station monitoring".to_string(),
                "Priority same-week scheduling".to_string(),
            ],
            guarantees: vec![
                "Free re-treatment between visits".to_string(),
                "Money-back satisfaction guarantee".to_string(),
                "Termite damage warranty".to_string(),
            ],
            covered_pests: vec![
                PestType::Ants,
                PestType::Roaches,
                PestType::Rodents,
                PestType::Mosquitoes,
                PestType::Termites,
                PestType::General,
            ],
            is_popular: false,
            savings: Some(Money::cents(30000)),
        },
    ]
}
