pub mod analysis_request_service;

pub use analysis_request_service::AnalysisRequestService;
