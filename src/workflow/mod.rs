pub mod item_ctx;
pub mod reconciler;

pub use item_ctx::ItemCtx;
pub use reconciler::Reconciler;
