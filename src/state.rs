use std::sync::Arc;

use crate::data::model::CommuteTable;
use crate::layout::{Dashboard, Pager, PanelContent};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Composed panels, built once at startup.
    pub dashboard: Dashboard,

    /// Shared table backing the data panel.
    pub table: Arc<CommuteTable>,

    /// Current page of the data table (0-based).
    pub page: usize,
}

impl AppState {
    pub fn new(dashboard: Dashboard, table: Arc<CommuteTable>) -> Self {
        Self {
            dashboard,
            table,
            page: 0,
        }
    }

    /// Pager of the table panel, if the dashboard has one.
    pub fn pager(&self) -> Option<Pager> {
        self.dashboard.panels.iter().find_map(|p| match &p.content {
            PanelContent::Table { pager, .. } => Some(*pager),
            PanelContent::Chart(_) => None,
        })
    }

    pub fn next_page(&mut self) {
        if let Some(pager) = self.pager() {
            self.page = (self.page + 1).min(pager.page_count() - 1);
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::UnknownModePolicy;
    use crate::data::mode::ModeCatalog;
    use crate::data::model::Cell;
    use crate::pipeline::build_dashboard;

    fn state_with_rows(n: usize) -> AppState {
        let table = CommuteTable::new(
            vec![
                "transportation".into(),
                "start_time".into(),
                "ladybug_total_duration".into(),
                "foot_total_duration".into(),
            ],
            (0..n)
                .map(|i| {
                    vec![
                        Cell::String("foot".into()),
                        Cell::Integer(540 + i as i64),
                        Cell::Null,
                        Cell::Integer(20),
                    ]
                })
                .collect(),
        );
        let dashboard =
            build_dashboard(&table, &ModeCatalog::default(), UnknownModePolicy::Skip).unwrap();
        AppState::new(dashboard, Arc::new(table))
    }

    #[test]
    fn paging_stays_in_bounds() {
        let mut state = state_with_rows(8);
        state.prev_page();
        assert_eq!(state.page, 0);
        state.next_page();
        state.next_page();
        assert_eq!(state.page, 1);
        assert_eq!(state.pager().unwrap().page_rows(state.page), 6..8);
    }
}
