pub mod completion_client;
pub mod extraction_service;
pub mod quiz_service;
