use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pharmaops_core::{DomainError, DomainResult, Entity, SupplierId};

/// How tolerant a supplier is of late payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexibilityLevel {
    Low,
    Medium,
    High,
}

impl FlexibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlexibilityLevel::Low => "low",
            FlexibilityLevel::Medium => "medium",
            FlexibilityLevel::High => "high",
        }
    }
}

/// A counterparty paid by cheque. Obligations refer to suppliers by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SupplierRecord")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub flexibility_level: FlexibilityLevel,
}

impl Supplier {
    pub fn new(
        id: SupplierId,
        name: impl Into<String>,
        flexibility_level: FlexibilityLevel,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        Ok(Self {
            id,
            name,
            flexibility_level,
        })
    }
}

#[derive(Deserialize)]
struct SupplierRecord {
    id: SupplierId,
    name: String,
    flexibility_level: FlexibilityLevel,
}

impl TryFrom<SupplierRecord> for Supplier {
    type Error = DomainError;

    fn try_from(record: SupplierRecord) -> DomainResult<Self> {
        Supplier::new(record.id, record.name, record.flexibility_level)
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lookup used to resolve an obligation's supplier at suggestion time.
pub type SupplierIndex = HashMap<SupplierId, Supplier>;

pub fn index_suppliers(suppliers: impl IntoIterator<Item = Supplier>) -> SupplierIndex {
    suppliers.into_iter().map(|s| (s.id, s)).collect()
}
