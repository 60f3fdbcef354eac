pub mod document_service;
pub mod fingerprint;
pub mod karma;
pub mod storage;
