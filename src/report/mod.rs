mod html;

pub use html::render_table;
