use eframe::egui::{Button, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::aggregate::cell_hour;
use crate::data::model::{CommuteTable, START_TIME_COLUMN};
use crate::layout::Pager;

const ROW_HEIGHT: f32 = 20.0;

/// Pager button pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
}

/// Display text of every table panel cell in `row`: the source cells followed
/// by the derived hour, blank when `start_time` is unusable.
pub fn row_texts(table: &CommuteTable, row: usize) -> Vec<String> {
    let Some(cells) = table.rows.get(row) else {
        return Vec::new();
    };
    let hour = table
        .column_index(START_TIME_COLUMN)
        .and_then(|idx| cells.get(idx))
        .and_then(cell_hour)
        .map(|h| h.to_string())
        .unwrap_or_default();
    cells
        .iter()
        .map(|cell| cell.to_string())
        .chain(std::iter::once(hour))
        .collect()
}

/// Render one page of the raw-data table with pager controls. `columns` are
/// the panel headers: the source columns plus the derived hour.
pub fn data_table(
    ui: &mut Ui,
    table: &CommuteTable,
    columns: &[String],
    pager: Pager,
    page: usize,
) -> Option<PageNav> {
    let page = page.min(pager.page_count() - 1);
    let mut nav = None;

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(page > 0, Button::new("◀")).clicked() {
            nav = Some(PageNav::Prev);
        }
        ui.label(format!("Page {} / {}", page + 1, pager.page_count()));
        if ui
            .add_enabled(page + 1 < pager.page_count(), Button::new("▶"))
            .clicked()
        {
            nav = Some(PageNav::Next);
        }
        ui.separator();
        ui.label(format!("{} rows", table.len()));
    });

    let rows = pager.page_rows(page);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(ROW_HEIGHT, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                for text in row_texts(table, rows.start + row.index()) {
                    row.col(|ui: &mut Ui| {
                        ui.label(text);
                    });
                }
            });
        });

    nav
}
