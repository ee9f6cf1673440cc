//! Report repository.

use std::sync::Arc;

use naijafix_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::entities::{
    Report,
    report::{self, Category, ReportStatus},
};

/// Filter for report list queries. Conditions are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Restrict to a workflow status.
    pub status: Option<ReportStatus>,
    /// Restrict to an issue category.
    pub category: Option<Category>,
    /// Restrict to a Nigerian state.
    pub state: Option<String>,
}

/// One page of query results plus the pagination totals.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items on this page, ordered by `created_at` descending.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total page count, `ceil(total / limit)`.
    pub pages: u64,
}

/// Per-category aggregate counts, one row per category present in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// The category.
    pub category: Category,
    /// Reports in this category regardless of status.
    pub total: u64,
    /// Pending reports.
    pub pending: u64,
    /// In-progress reports.
    pub in_progress: u64,
    /// Resolved reports.
    pub resolved: u64,
}

/// Per-state report count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
    /// The Nigerian state.
    pub state: String,
    /// Reports filed against it.
    pub count: u64,
}

/// Number of pages needed for `total` items at `limit` per page.
#[must_use]
pub const fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

#[derive(Debug, FromQueryResult)]
struct CategoryStatusRow {
    category: Category,
    status: ReportStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct StateRow {
    state: String,
    count: i64,
}

/// Repository for report operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a fully populated report.
    pub async fn create(&self, report: report::ActiveModel) -> AppResult<report::Model> {
        report
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<report::Model>> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find one page of reports matching `filter`, newest first.
    pub async fn find_page(
        &self,
        filter: &ReportFilter,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        let mut query = Report::find();

        if let Some(status) = filter.status {
            query = query.filter(report::Column::Status.eq(status));
        }
        if let Some(category) = filter.category {
            query = query.filter(report::Column::Category.eq(category));
        }
        if let Some(ref state) = filter.state {
            query = query.filter(report::Column::State.eq(state));
        }

        self.paginate(query, page, limit).await
    }

    /// Find one page of a user's reports, newest first.
    pub async fn find_by_user(
        &self,
        userid: &str,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        let query = Report::find().filter(report::Column::Userid.eq(userid));
        self.paginate(query, page, limit).await
    }

    async fn paginate(
        &self,
        query: sea_orm::Select<Report>,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        let page = page.max(1);
        let limit = limit.max(1);

        let paginator = query
            .order_by(report::Column::CreatedAt, Order::Desc)
            .paginate(self.db.as_ref(), limit);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Paginator pages are 0-based; the API contract is 1-based.
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Page {
            items,
            total,
            page,
            limit,
            pages: page_count(total, limit),
        })
    }

    /// Persist changes to an existing report.
    pub async fn update(&self, report: report::ActiveModel) -> AppResult<report::Model> {
        report
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a report by ID. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = Report::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Count all reports.
    pub async fn count_all(&self) -> AppResult<u64> {
        Report::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count reports with the given status.
    pub async fn count_by_status(&self, status: ReportStatus) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Per-category totals with a status breakdown, ordered by total descending.
    pub async fn aggregate_by_category(&self) -> AppResult<Vec<CategoryBreakdown>> {
        let rows: Vec<CategoryStatusRow> = Report::find()
            .select_only()
            .column(report::Column::Category)
            .column(report::Column::Status)
            .column_as(report::Column::Id.count(), "count")
            .group_by(report::Column::Category)
            .group_by(report::Column::Status)
            .into_model()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(fold_category_rows(rows))
    }

    /// Report count per distinct state. Unordered; consumers sort as needed.
    pub async fn aggregate_by_state(&self) -> AppResult<Vec<StateCount>> {
        let rows: Vec<StateRow> = Report::find()
            .select_only()
            .column(report::Column::State)
            .column_as(report::Column::Id.count(), "count")
            .group_by(report::Column::State)
            .into_model()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| StateCount {
                state: row.state,
                count: row.count.max(0) as u64,
            })
            .collect())
    }
}

fn fold_category_rows(rows: Vec<CategoryStatusRow>) -> Vec<CategoryBreakdown> {
    let mut breakdowns: Vec<CategoryBreakdown> = Vec::new();

    for row in rows {
        let count = row.count.max(0) as u64;
        let idx = match breakdowns.iter().position(|b| b.category == row.category) {
            Some(idx) => idx,
            None => {
                breakdowns.push(CategoryBreakdown {
                    category: row.category,
                    total: 0,
                    pending: 0,
                    in_progress: 0,
                    resolved: 0,
                });
                breakdowns.len() - 1
            }
        };
        let entry = &mut breakdowns[idx];

        entry.total += count;
        match row.status {
            ReportStatus::Pending => entry.pending += count,
            ReportStatus::InProgress => entry.in_progress += count,
            ReportStatus::Resolved => entry.resolved += count,
        }
    }

    breakdowns.sort_by(|a, b| b.total.cmp(&a.total));
    breakdowns
}
