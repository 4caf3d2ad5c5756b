pub mod app;
pub mod sheets;

pub use app::{admin_token, make_test_app, user_token};
pub use sheets::{FakeSheets, SheetsMode};
