//! Error types for the Nomi engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("rpc error: {0}")] Rpc(String),
    #[error("{call} timed out after {after_ms}ms")] Timeout { call: String, after_ms: u64 },
    #[error("account not found: {0}")] AccountNotFound(String),
    #[error("decode error: {0}")] Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend: {0}")] Backend(String),
    #[error("{call} timed out after {after_ms}ms")] Timeout { call: String, after_ms: u64 },
    #[error("serialization: {0}")] Serialization(String),
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("transport: {0}")] Transport(String),
    #[error("unexpected status {0}")] Status(u16),
    #[error("decode: {0}")] Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("read timeout must be non-zero")] ZeroTimeout,
    #[error("max_concurrent_reads must be non-zero")] ZeroConcurrency,
    #[error("weight {name} is invalid: {value}")] InvalidWeight { name: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("active era unavailable: {0}")] EraUnavailable(#[source] ChainError),
    #[error(transparent)] Config(#[from] ConfigError),
}
