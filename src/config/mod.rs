//! Configuration module for Hark.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    EmbeddingProvider, EmbeddingSettings, GeneralSettings, LocalModelSettings, RemoteSettings,
    RetrievalSettings, Settings,
};
