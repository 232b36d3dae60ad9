pub mod toml_loader;

pub use toml_loader::{builtin_questions, load_question_bank, parse_question_bank};
