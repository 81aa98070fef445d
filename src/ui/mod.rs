pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{bullet, dim, header, info, section, star_bar, stars, success, summary_row, warn};
pub use table::{customer_table, restaurant_table, review_table, stats_table};
pub use theme::{theme, Theme};
