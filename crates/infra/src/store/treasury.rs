use pharmaops_core::{BranchId, ExpenseId, ObligationId, RevenueEntryId, SupplierId};
use pharmaops_treasury::{
    ActualRevenueEntry, ExpectedRevenueEntry, Expense, Obligation, Settings, Supplier,
};

use super::{BranchStore, InMemoryBranchStore, StoreResult};

/// Read and write accessors for one branch's treasury records.
pub trait TreasuryStore: Send + Sync {
    /// Stored settings, or `None` when the branch has never been configured.
    fn settings(&self, branch: BranchId) -> StoreResult<Option<Settings>>;
    fn save_settings(&self, branch: BranchId, settings: Settings) -> StoreResult<()>;

    fn suppliers(&self, branch: BranchId) -> StoreResult<Vec<Supplier>>;
    fn upsert_supplier(&self, branch: BranchId, supplier: Supplier) -> StoreResult<()>;

    fn obligations(&self, branch: BranchId) -> StoreResult<Vec<Obligation>>;
    fn obligation(&self, branch: BranchId, id: ObligationId) -> StoreResult<Option<Obligation>>;
    fn upsert_obligation(&self, branch: BranchId, obligation: Obligation) -> StoreResult<()>;

    fn expenses(&self, branch: BranchId) -> StoreResult<Vec<Expense>>;
    fn expense(&self, branch: BranchId, id: ExpenseId) -> StoreResult<Option<Expense>>;
    fn upsert_expense(&self, branch: BranchId, expense: Expense) -> StoreResult<()>;

    fn actual_revenue(&self, branch: BranchId) -> StoreResult<Vec<ActualRevenueEntry>>;
    fn record_actual_revenue(&self, branch: BranchId, entry: ActualRevenueEntry) -> StoreResult<()>;

    fn expected_revenue(&self, branch: BranchId) -> StoreResult<Vec<ExpectedRevenueEntry>>;
    fn record_expected_revenue(
        &self,
        branch: BranchId,
        entry: ExpectedRevenueEntry,
    ) -> StoreResult<()>;
}

/// In-memory [`TreasuryStore`] for tests/dev: one branch store per record type.
#[derive(Debug, Default)]
pub struct InMemoryTreasuryStore {
    settings: InMemoryBranchStore<(), Settings>,
    suppliers: InMemoryBranchStore<SupplierId, Supplier>,
    obligations: InMemoryBranchStore<ObligationId, Obligation>,
    expenses: InMemoryBranchStore<ExpenseId, Expense>,
    actual_revenue: InMemoryBranchStore<RevenueEntryId, ActualRevenueEntry>,
    expected_revenue: InMemoryBranchStore<RevenueEntryId, ExpectedRevenueEntry>,
}

impl InMemoryTreasuryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreasuryStore for InMemoryTreasuryStore {
    fn settings(&self, branch: BranchId) -> StoreResult<Option<Settings>> {
        self.settings.get(branch, &())
    }

    fn save_settings(&self, branch: BranchId, settings: Settings) -> StoreResult<()> {
        self.settings.upsert(branch, (), settings)
    }

    fn suppliers(&self, branch: BranchId) -> StoreResult<Vec<Supplier>> {
        self.suppliers.list(branch)
    }

    fn upsert_supplier(&self, branch: BranchId, supplier: Supplier) -> StoreResult<()> {
        self.suppliers.upsert(branch, supplier.id, supplier)
    }

    fn obligations(&self, branch: BranchId) -> StoreResult<Vec<Obligation>> {
        self.obligations.list(branch)
    }

    fn obligation(&self, branch: BranchId, id: ObligationId) -> StoreResult<Option<Obligation>> {
        self.obligations.get(branch, &id)
    }

    fn upsert_obligation(&self, branch: BranchId, obligation: Obligation) -> StoreResult<()> {
        self.obligations.upsert(branch, obligation.id_typed(), obligation)
    }

    fn expenses(&self, branch: BranchId) -> StoreResult<Vec<Expense>> {
        self.expenses.list(branch)
    }

    fn expense(&self, branch: BranchId, id: ExpenseId) -> StoreResult<Option<Expense>> {
        self.expenses.get(branch, &id)
    }

    fn upsert_expense(&self, branch: BranchId, expense: Expense) -> StoreResult<()> {
        self.expenses.upsert(branch, expense.id_typed(), expense)
    }

    fn actual_revenue(&self, branch: BranchId) -> StoreResult<Vec<ActualRevenueEntry>> {
        self.actual_revenue.list(branch)
    }

    fn record_actual_revenue(&self, branch: BranchId, entry: ActualRevenueEntry) -> StoreResult<()> {
        self.actual_revenue.upsert(branch, entry.id, entry)
    }

    fn expected_revenue(&self, branch: BranchId) -> StoreResult<Vec<ExpectedRevenueEntry>> {
        self.expected_revenue.list(branch)
    }

    fn record_expected_revenue(
        &self,
        branch: BranchId,
        entry: ExpectedRevenueEntry,
    ) -> StoreResult<()> {
        self.expected_revenue.upsert(branch, entry.id, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pharmaops_core::Money;
    use pharmaops_treasury::{FlexibilityLevel, ObligationPriority};

    #[test]
    fn unconfigured_branch_has_no_settings() {
        let store = InMemoryTreasuryStore::new();
        assert_eq!(store.settings(BranchId::new()).unwrap(), None);
    }

    #[test]
    fn obligation_upsert_overwrites_by_id() {
        let store = InMemoryTreasuryStore::new();
        let branch = BranchId::new();
        let supplier = Supplier::new(SupplierId::new(), "Medico", FlexibilityLevel::Medium).unwrap();
        store.upsert_supplier(branch, supplier.clone()).unwrap();

        let mut cheque = Obligation::schedule(
            ObligationId::new(),
            supplier.id,
            Money::from_major(250),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            ObligationPriority::Normal,
        )
        .unwrap();
        store.upsert_obligation(branch, cheque.clone()).unwrap();

        cheque.mark_paid().unwrap();
        store.upsert_obligation(branch, cheque.clone()).unwrap();

        assert_eq!(store.obligations(branch).unwrap(), vec![cheque.clone()]);
        assert_eq!(store.obligation(branch, cheque.id_typed()).unwrap(), Some(cheque));
        assert_eq!(store.suppliers(branch).unwrap(), vec![supplier]);
    }
}
