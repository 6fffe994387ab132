use serde::{Deserialize, Serialize};

/// The four generated insight sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Guidance,
    Medicines,
    Remedies,
    Facilities,
}

impl SectionId {
    /// All sections, in stage dispatch order.
    pub const ALL: [SectionId; 4] = [
        SectionId::Guidance,
        SectionId::Medicines,
        SectionId::Remedies,
        SectionId::Facilities,
    ];

    /// Sections that must resolve before a record can be saved.
    /// Facilities is best-effort (location may be legitimately absent).
    pub const MANDATORY: [SectionId; 3] = [
        SectionId::Guidance,
        SectionId::Medicines,
        SectionId::Remedies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guidance => "guidance",
            Self::Medicines => "medicines",
            Self::Remedies => "remedies",
            Self::Facilities => "facilities",
        }
    }

    /// Slot position on the section board.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Guidance => 0,
            Self::Medicines => 1,
            Self::Remedies => 2,
            Self::Facilities => 3,
        }
    }

    /// Fixed human-readable text shown when the stage fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Guidance => "Error fetching health guidance. Please try again.",
            Self::Medicines => "Error fetching medicine suggestions.",
            Self::Remedies => "Error fetching natural remedies.",
            Self::Facilities => "Error fetching nearby facilities.",
        }
    }
}

/// Lifecycle of one section's reveal stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    Idle,
    Streaming,
    Complete,
    Failed,
}

impl StreamState {
    /// True once the stream can no longer change on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// One-shot device location acquired from the host environment.
///
/// Read-only once acquired; absent when permission is denied or the
/// lookup never resolves. Only the Facilities stage depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationHint {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationHint {
    /// Serialized form stored on the insight record.
    pub fn to_record_string(self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}
