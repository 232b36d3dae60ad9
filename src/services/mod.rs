pub mod answer_store;
pub mod question_bank;
pub mod registration_service;
pub mod submission_service;

pub use answer_store::AnswerStore;
pub use question_bank::select_ordered;
pub use registration_service::RegistrationService;
pub use submission_service::{
    SubmissionOutcome, SubmissionService, DEFAULT_COMPLETION, FALLBACK_SUMMARY,
};
