//! Enums for client types and instance status.

use serde::{Deserialize, Serialize};

/// The torrent client a simulated instance impersonates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// qBittorrent (default).
    #[default]
    QBittorrent,
    /// Transmission.
    Transmission,
    /// Deluge.
    Deluge,
    /// uTorrent.
    UTorrent,
}

impl ClientKind {
    /// Get the identifier string used in config files and announce headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QBittorrent => "qbittorrent",
            Self::Transmission => "transmission",
            Self::Deluge => "deluge",
            Self::UTorrent => "utorrent",
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation status of an instance, driving UI badges and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Configured and waiting to be started.
    #[default]
    Idle,
    /// Needs user attention (e.g. no torrent selected).
    Warning,
    /// Actively faking transfer traffic.
    Running,
    /// Stopped by the user or a stop condition.
    Stopped,
    /// A backend operation failed for this instance.
    Error,
}

impl StatusKind {
    /// Get display string for UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Warning => "Warning",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Error => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_kind_serializes_lowercase() {
        let toml = toml::to_string(&std::collections::BTreeMap::from([(
            "client",
            ClientKind::QBittorrent,
        )]))
        .unwrap();
        assert!(toml.contains("\"qbittorrent\""));
    }

    #[test]
    fn client_kind_default_is_qbittorrent() {
        assert_eq!(ClientKind::default(), ClientKind::QBittorrent);
    }

    #[test]
    fn status_kind_display_strings() {
        assert_eq!(StatusKind::Warning.as_str(), "Warning");
        assert_eq!(StatusKind::Running.as_str(), "Running");
    }
}
