pub mod formatter;

pub use formatter::{
    format_result, format_result_detail, format_store_table, should_use_colors,
};
