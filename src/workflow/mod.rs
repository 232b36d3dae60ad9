pub mod result_view;
pub mod session;
pub mod test_flow;

pub use result_view::ResultView;
pub use session::{Advance, Screen, Session};
pub use test_flow::TestFlow;
