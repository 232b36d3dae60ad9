pub mod answer;
pub mod candidate;
pub mod loaders;
pub mod question;
pub mod submission;

pub use answer::{Answer, SliderValue};
pub use candidate::{CandidateForm, RegisteredCandidate};
pub use loaders::{builtin_questions, load_question_bank};
pub use question::{Question, QuestionBank};
pub use submission::{ResponseRecord, SubmissionPayload, SubmitResponse};
