pub mod analysis_request;
pub mod user;

pub use analysis_request::Entity as AnalysisRequest;
pub use user::Entity as User;
