pub mod differ;
pub mod lookup;
pub mod report_builder;
pub mod template_writer;
pub mod validator;

pub use differ::{diff, Diff};
pub use template_writer::TemplateWriter;
pub use validator::validate;
