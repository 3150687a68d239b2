pub mod analytics;
pub mod camera;
pub mod card;
pub mod card_batch;
pub mod card_text;
pub mod pagination;
pub mod scanner;
