//! Record models mapping 1:1 to the SQLite tables.

mod feedback_record;
mod order_record;
mod service_request_record;
mod turn_record;

pub use feedback_record::FeedbackRecord;
pub use order_record::OrderRecord;
pub use service_request_record::ServiceRequestRecord;
pub use turn_record::TurnRecord;

pub(crate) use turn_record::sender_str;
