//! Revenue: confirmed (actual) and forecast (expected) takings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmaops_core::{DomainError, DomainResult, Entity, Money, RevenueEntryId, TimeOfDay};

/// Expected takings land with the card settlement run at 13:00 by default.
pub const DEFAULT_EXPECTED_TIME: TimeOfDay = TimeOfDay::hm(13, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Cash,
    Visa,
}

impl PaymentType {
    /// Cash is banked first thing; card takings arrive with the afternoon settlement.
    pub fn default_settlement_time(self) -> TimeOfDay {
        match self {
            PaymentType::Cash => TimeOfDay::hm(8, 0),
            PaymentType::Visa => DEFAULT_EXPECTED_TIME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Confirmed money for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActualRevenueRecord")]
pub struct ActualRevenueEntry {
    pub id: RevenueEntryId,
    pub revenue_date: NaiveDate,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub settlement_time: TimeOfDay,
}

impl ActualRevenueEntry {
    pub fn new(
        id: RevenueEntryId,
        revenue_date: NaiveDate,
        amount: Money,
        payment_type: PaymentType,
    ) -> DomainResult<Self> {
        let amount = amount.ensure_non_negative("revenue amount")?;
        Ok(Self {
            id,
            revenue_date,
            amount,
            payment_type,
            settlement_time: payment_type.default_settlement_time(),
        })
    }

    pub fn with_settlement_time(mut self, settlement_time: TimeOfDay) -> Self {
        self.settlement_time = settlement_time;
        self
    }
}

#[derive(Deserialize)]
struct ActualRevenueRecord {
    id: RevenueEntryId,
    revenue_date: NaiveDate,
    amount: Money,
    payment_type: PaymentType,
    settlement_time: Option<TimeOfDay>,
}

impl TryFrom<ActualRevenueRecord> for ActualRevenueEntry {
    type Error = DomainError;

    fn try_from(record: ActualRevenueRecord) -> DomainResult<Self> {
        let entry = ActualRevenueEntry::new(
            record.id,
            record.revenue_date,
            record.amount,
            record.payment_type,
        )?;
        Ok(match record.settlement_time {
            Some(time) => entry.with_settlement_time(time),
            None => entry,
        })
    }
}

impl Entity for ActualRevenueEntry {
    type Id = RevenueEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Speculative takings for a date. Ignored once any actual entry exists for that date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExpectedRevenueRecord")]
pub struct ExpectedRevenueEntry {
    pub id: RevenueEntryId,
    pub expected_date: NaiveDate,
    pub expected_amount: Money,
    pub confidence: Confidence,
    /// Informational only: the forecast books every expected entry in the afternoon window.
    pub expected_time: TimeOfDay,
    pub reason: String,
}

impl ExpectedRevenueEntry {
    pub fn new(
        id: RevenueEntryId,
        expected_date: NaiveDate,
        expected_amount: Money,
        confidence: Confidence,
        reason: impl Into<String>,
    ) -> DomainResult<Self> {
        let expected_amount = expected_amount.ensure_non_negative("expected revenue amount")?;
        Ok(Self {
            id,
            expected_date,
            expected_amount,
            confidence,
            expected_time: DEFAULT_EXPECTED_TIME,
            reason: reason.into(),
        })
    }

    pub fn with_expected_time(mut self, expected_time: TimeOfDay) -> Self {
        self.expected_time = expected_time;
        self
    }
}

#[derive(Deserialize)]
struct ExpectedRevenueRecord {
    id: RevenueEntryId,
    expected_date: NaiveDate,
    expected_amount: Money,
    confidence: Confidence,
    expected_time: Option<TimeOfDay>,
    #[serde(default)]
    reason: String,
}

impl TryFrom<ExpectedRevenueRecord> for ExpectedRevenueEntry {
    type Error = DomainError;

    fn try_from(record: ExpectedRevenueRecord) -> DomainResult<Self> {
        let entry = ExpectedRevenueEntry::new(
            record.id,
            record.expected_date,
            record.expected_amount,
            record.confidence,
            record.reason,
        )?;
        Ok(match record.expected_time {
            Some(time) => entry.with_expected_time(time),
            None => entry,
        })
    }
}

impl Entity for ExpectedRevenueEntry {
    type Id = RevenueEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
