pub mod level;
pub mod loaders;
pub mod outcome;
pub mod question;
pub mod summary;

pub use level::Level;
pub use loaders::{list_documents, load_document, Document};
pub use outcome::{
    AddedQuestion, ChangeReason, LevelCoercion, Outcome, Reconciled, SkipReason, UpdatedQuestion,
};
pub use question::{Answer, Question, RawLevel, SourceAnswer, SourceItem, User};
pub use summary::{DocumentSummary, ProcessingNote, RunSummary};
