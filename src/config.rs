// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logger configuration and level handling.
//!
//! [`Configuration`] is built once at process start by the host application
//! and is read-only afterwards. Empty fields are simply omitted from the
//! emitted records, so a partially filled configuration is fine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels supported by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Parse a level name.
    ///
    /// Matching is case-sensitive. Anything unrecognized, including the
    /// empty string, falls back to [`Level::Info`]; a misconfigured level
    /// must never keep the process from logging.
    pub fn parse(value: &str) -> Level {
        match value {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    /// The lowercase wire name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static deployment metadata stamped onto every record.
///
/// Created once at process start; owned by the [`crate::Logger`] instance
/// and never reloaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Deployment environment (prod, staging, ...).
    pub environment: String,

    /// Service name.
    pub service: String,

    /// Owning team.
    pub team: String,

    /// Project the service belongs to.
    pub project: String,

    /// Minimum level written to the console sink. See [`Level::parse`].
    pub console_level: String,

    /// Service version.
    pub version: String,
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Set the owning team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    /// Set the project.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Set the console level by name.
    pub fn with_console_level(mut self, level: impl Into<String>) -> Self {
        self.console_level = level.into();
        self
    }

    /// Set the service version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The parsed console level.
    pub fn level(&self) -> Level {
        Level::parse(&self.console_level)
    }
}
