#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum M2genError {
    #[error("Template not found: {name}")]
    #[diagnostic(help("The installation is incomplete; every skeleton and fragment must ship with m2gen"))]
    TemplateNotFound { name: String },

    #[error("Failed to parse template {name}: {message}")]
    #[diagnostic(help("Templates must be well-formed XML with a single root element"))]
    TemplateParse { name: String, message: String },

    #[error("Input '{input}' is not valid: {message}")]
    #[diagnostic(help("Structured inputs must be a JSON array of objects"))]
    InvalidInput { input: String, message: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(help("Pass the settings location explicitly with --path"))]
    HomeNotFound,

    #[error("Failed to parse state file {path}")]
    #[diagnostic(help("Delete the state file; it is recreated on the next generate"))]
    StateParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse inputs file {path}")]
    #[diagnostic(help("The inputs file must be a flat TOML table of name = value pairs"))]
    InputsFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {message}")]
    Serialize { message: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, M2genError>;
