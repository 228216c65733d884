//! Errors raised while reading recipe settings and options.

use miette::Diagnostic;
use thiserror::Error;

/// Setting or option value that cannot be used to configure the recipe.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum SettingsError {
    #[error("expected `key=value`, found `{0}`")]
    #[diagnostic(
        code(boostpkg::settings::malformed),
        help("Pass settings as `-s compiler=gcc` and options as `-o shared=True`")
    )]
    Malformed(String),

    #[error("unknown setting `{0}`")]
    #[diagnostic(
        code(boostpkg::settings::unknown_key),
        help("Valid settings: os, arch, compiler, compiler.version, compiler.runtime, compiler.libcxx, build_type")
    )]
    UnknownSetting(String),

    #[error("unknown option `{0}`")]
    #[diagnostic(code(boostpkg::options::unknown_key), help("Valid options: fPIC, shared"))]
    UnknownOption(String),

    #[error("invalid value `{value}` for `{key}`")]
    #[diagnostic(code(boostpkg::settings::invalid_value))]
    InvalidValue {
        key: &'static str,
        value: String,
        #[help]
        expected: Option<String>,
    },

    #[error("`compiler.runtime` is only valid for Visual Studio, not `{compiler}`")]
    #[diagnostic(code(boostpkg::settings::runtime_without_msvc))]
    RuntimeWithoutMsvc { compiler: String },

    #[error("`compiler.libcxx` is not valid for Visual Studio")]
    #[diagnostic(code(boostpkg::settings::libcxx_with_msvc))]
    LibcxxWithMsvc,

    #[error("Visual Studio version must be an integer, found `{0}`")]
    #[diagnostic(
        code(boostpkg::settings::msvc_version),
        help("Use the major version, e.g. `compiler.version=14`")
    )]
    InvalidMsvcVersion(String),
}

impl SettingsError {
    pub(crate) fn invalid(key: &'static str, value: &str, expected: &[&str]) -> Self {
        SettingsError::InvalidValue {
            key,
            value: value.to_string(),
            expected: Some(format!("expected one of: {}", expected.join(", "))),
        }
    }
}

/// Split a `key=value` pair as given on the command line.
pub fn split_pair(pair: &str) -> Result<(&str, &str), SettingsError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(SettingsError::Malformed(pair.to_string())),
    }
}
