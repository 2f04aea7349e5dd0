//! 基础设施层
//!
//! 持有稀缺资源（数据库连接），只暴露存储能力。

pub mod schema;
pub mod sqlite_store;
pub mod store;
pub mod unit_of_work;

pub use sqlite_store::SqliteStore;
pub use store::{QuestionStore, StoreStats};
pub use unit_of_work::UnitOfWork;
