// Components module - reusable UI building blocks
//
// Shell components (title bar, status bar) render in every view; the
// panel components each own one view's body.

pub mod category_panel;
pub mod channels_panel;
pub mod chat_panel;
pub mod formatters;
pub mod overview_panel;
pub mod product_table;
pub mod refund_panel;
pub mod status_bar;
pub mod title_bar;
