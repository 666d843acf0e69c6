pub mod quiz_item;
pub mod upload;

pub use quiz_item::QuizItem;
pub use upload::{DocumentKind, Upload};
