//! Forecast orchestration for one branch: load a snapshot, build, advise.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use pharmaops_core::BranchId;
use pharmaops_forecast::{
    ForecastDay, ForecastInputs, ForecastSummary, Suggestion, build_forecast, suggest, summarize,
};
use pharmaops_treasury::{Settings, index_suppliers};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::executor::{Acceptance, UpdatedRecord, execute_suggestion};
use crate::store::TreasuryStore;

/// Result of one forecast run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastReport {
    pub branch: BranchId,
    pub generated_for: NaiveDate,
    pub settings: Settings,
    pub days: Vec<ForecastDay>,
    pub suggestions: Vec<Suggestion>,
    pub summary: ForecastSummary,
}

pub struct ForecastService<S: ?Sized> {
    store: Arc<S>,
    /// Used for branches without stored settings.
    defaults: Settings,
}

impl<S> ForecastService<S>
where
    S: TreasuryStore + ?Sized,
{
    pub fn new(store: Arc<S>, defaults: Settings) -> Self {
        Self { store, defaults }
    }

    pub fn from_config(store: Arc<S>, config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self::new(store, config.settings()?))
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stored settings for the branch, falling back to the service defaults.
    pub fn settings(&self, branch: BranchId) -> EngineResult<Settings> {
        Ok(self
            .store
            .settings(branch)?
            .unwrap_or_else(|| self.defaults.clone()))
    }

    pub fn update_settings(&self, branch: BranchId, settings: Settings) -> EngineResult<()> {
        settings.validate()?;
        self.store.save_settings(branch, settings.clone())?;
        info!(
            branch = %branch,
            horizon = settings.forecast_horizon_days,
            safe_threshold = %settings.safe_threshold,
            "forecast settings updated"
        );
        Ok(())
    }

    /// Build the forecast starting at `today` and advise on it.
    pub fn run(&self, branch: BranchId, today: NaiveDate) -> EngineResult<ForecastReport> {
        let span = info_span!("forecast_run", branch = %branch, today = %today);
        let _guard = span.enter();

        let settings = self.settings(branch)?;
        let suppliers = self.store.suppliers(branch)?;
        let obligations = self.store.obligations(branch)?;
        let expenses = self.store.expenses(branch)?;
        let actual_revenue = self.store.actual_revenue(branch)?;
        let expected_revenue = self.store.expected_revenue(branch)?;
        debug!(
            suppliers = suppliers.len(),
            obligations = obligations.len(),
            expenses = expenses.len(),
            actual = actual_revenue.len(),
            expected = expected_revenue.len(),
            "snapshot loaded"
        );

        let inputs = ForecastInputs {
            obligations: &obligations,
            expenses: &expenses,
            actual_revenue: &actual_revenue,
            expected_revenue: &expected_revenue,
        };
        let days = build_forecast(today, &settings, &inputs);
        let suggestions = suggest(&days, &index_suppliers(suppliers));
        let summary = summarize(&days);

        info!(
            horizon = settings.forecast_horizon_days,
            suggestions = suggestions.len(),
            critical_days = summary.critical_days,
            warning_days = summary.warning_days,
            "forecast built"
        );
        if let Some(date) = summary.first_critical_date {
            warn!(first_critical_date = %date, "liquidity shortfall projected");
        }

        Ok(ForecastReport {
            branch,
            generated_for: today,
            settings,
            days,
            suggestions,
            summary,
        })
    }

    /// [`run`](Self::run) using the local calendar date.
    pub fn run_today(&self, branch: BranchId) -> EngineResult<ForecastReport> {
        self.run(branch, Local::now().date_naive())
    }

    /// Execute an accepted suggestion, then rebuild the forecast so the change shows.
    pub fn accept(
        &self,
        branch: BranchId,
        today: NaiveDate,
        suggestion: &Suggestion,
        acceptance: &Acceptance,
    ) -> EngineResult<(UpdatedRecord, ForecastReport)> {
        let updated = execute_suggestion(self.store.as_ref(), branch, suggestion, acceptance)?;
        let report = self.run(branch, today)?;
        Ok((updated, report))
    }
}
