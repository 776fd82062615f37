mod bar_window;
mod history;
mod pivot;
mod state;
pub mod view;

pub use {
    bar_window::BarWindow,
    history::PivotHistory,
    pivot::{Pivot, PivotDir, Point},
    state::{ZigzagFlags, ZigzagState},
    view::{FieldValue, KeyOrder, PivotField},
};
