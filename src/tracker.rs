//! The presentation-facing read and write operations.
//!
//! A [`Tracker`] owns an [`ExpenseStore`] and a [`CategoryPalette`]. Writes validate their input
//! before touching the store. Reads always refetch every expense and recompute the requested view
//! from scratch, so every read reflects all prior writes.

use crate::engine::{self, ChartFilter, ChartSeries, FilterOptions, Listing, ListingFilter};
use crate::model::{Amount, ExpenseId, NewExpense};
use crate::palette::CategoryPalette;
use crate::store::ExpenseStore;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Identifies one full reload. Later reloads carry larger tokens.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct ReloadToken(u64);

impl ReloadToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out reload tokens and remembers the newest one whose result was applied.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> ReloadToken {
        ReloadToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Marks `token` as applied unless a newer token already was. Returns `false` for a stale
    /// token, whose result should be dropped.
    pub fn try_accept(&self, token: ReloadToken) -> bool {
        self.applied.fetch_max(token.0, Ordering::SeqCst) < token.0
    }
}

/// The filters of every view refreshed by [`Tracker::reload`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ViewQuery {
    pub listing: ListingFilter,
    pub chart: ChartFilter,
}

/// Every derived view, computed from a single fetch.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub token: ReloadToken,
    pub current_total: Amount,
    pub listing: Listing,
    pub options: FilterOptions,
    pub chart: ChartSeries,
}

pub struct Tracker<S> {
    store: S,
    palette: Mutex<CategoryPalette>,
    sequencer: RequestSequencer,
}

impl<S: ExpenseStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_palette(store, CategoryPalette::new())
    }

    /// Uses `palette` for chart colors, keeping any colors it already assigned.
    pub fn with_palette(store: S, palette: CategoryPalette) -> Self {
        Self {
            store,
            palette: Mutex::new(palette),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates the input and stores a new expense. Nothing is written when validation fails.
    pub async fn record_expense(
        &self,
        date: &str,
        amount: &str,
        category: &str,
    ) -> Result<ExpenseId> {
        let expense = NewExpense::parse(date, amount, category)?;
        self.record(&expense).await
    }

    /// Stores an expense that has already been validated.
    pub async fn record(&self, expense: &NewExpense) -> Result<ExpenseId> {
        let id = self.store.create(expense).await?;
        debug!("Recorded expense {id} on {}", expense.date());
        Ok(id)
    }

    /// Deletes one expense. A missing `id` is not an error; it returns `false`.
    pub async fn remove_expense(&self, id: ExpenseId) -> Result<bool> {
        let removed = self.store.delete_by_id(id).await?;
        debug!("Remove expense {id}: removed={removed}");
        Ok(removed)
    }

    /// Deletes every expense and returns how many there were.
    pub async fn remove_all_expenses(&self) -> Result<u64> {
        let count = self.store.delete_all().await?;
        debug!("Removed all {count} expenses");
        Ok(count)
    }

    pub async fn current_period_total(&self, today: NaiveDate) -> Result<Amount> {
        let expenses = self.store.fetch_all().await?;
        Ok(engine::current_period_total(&expenses, today))
    }

    pub async fn filtered_listing(&self, filter: &ListingFilter) -> Result<Listing> {
        let expenses = self.store.fetch_all().await?;
        Ok(engine::filtered_listing(&expenses, filter))
    }

    pub async fn filter_options(&self) -> Result<FilterOptions> {
        let expenses = self.store.fetch_all().await?;
        Ok(engine::filter_options(&expenses))
    }

    pub async fn chart_series(&self, filter: &ChartFilter) -> Result<ChartSeries> {
        let expenses = self.store.fetch_all().await?;
        Ok(engine::chart_series(&expenses, filter, &mut self.palette()))
    }

    /// Recomputes every view from one fetch.
    ///
    /// Returns `None` when a reload that started later has already produced its result; the
    /// caller should keep showing that newer result.
    pub async fn reload(&self, query: &ViewQuery, today: NaiveDate) -> Result<Option<Dashboard>> {
        let token = self.sequencer.issue();
        let expenses = self.store.fetch_all().await?;

        let dashboard = Dashboard {
            token,
            current_total: engine::current_period_total(&expenses, today),
            listing: engine::filtered_listing(&expenses, &query.listing),
            options: engine::filter_options(&expenses),
            chart: engine::chart_series(&expenses, &query.chart, &mut self.palette()),
        };

        if !self.sequencer.try_accept(token) {
            debug!("Discarding stale reload {}", token.value());
            return Ok(None);
        }
        Ok(Some(dashboard))
    }

    fn palette(&self) -> MutexGuard<'_, CategoryPalette> {
        // Assignments are append-only, so a poisoned palette is still consistent.
        self.palette.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
