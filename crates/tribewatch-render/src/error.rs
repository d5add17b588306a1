//! Error types for the renderer.
//!
//! A [`RenderError`] always names the [`Section`] that failed so the
//! caller can log which part of the view kept its previous content.

/// One of the four independent sub-renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Tick counter and weather summary.
    Status,
    /// Tribe blocks.
    Tribes,
    /// Agent blocks.
    Agents,
    /// Timeline lines.
    Timeline,
}

impl Section {
    /// Lowercase name used in log fields and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Tribes => "tribes",
            Self::Agents => "agents",
            Self::Timeline => "timeline",
        }
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while a section formats its slice of the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The snapshot has no value for a field the section needs.
    #[error("{section}: missing field `{field}`")]
    MissingField {
        /// The section that failed.
        section: Section,
        /// Name of the absent field.
        field: String,
    },

    /// A field is present but has the wrong shape (e.g. a string where a
    /// number is expected).
    #[error("{section}: invalid field `{field}`: {source}")]
    InvalidField {
        /// The section that failed.
        section: Section,
        /// Name of the malformed field.
        field: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// A numeric field is NaN or infinite.
    #[error("{section}: field `{field}` is not a finite number")]
    NonFinite {
        /// The section that failed.
        section: Section,
        /// Name of the offending field.
        field: String,
    },
}

impl RenderError {
    /// The section whose content could not be produced.
    pub const fn section(&self) -> Section {
        match self {
            Self::MissingField { section, .. }
            | Self::InvalidField { section, .. }
            | Self::NonFinite { section, .. } => *section,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_names_section_and_field() {
        let err = RenderError::MissingField {
            section: Section::Tribes,
            field: String::from("tribes"),
        };
        assert_eq!(err.to_string(), "tribes: missing field `tribes`");
        assert_eq!(err.section(), Section::Tribes);
    }

    #[test]
    fn non_finite_reports_section() {
        let err = RenderError::NonFinite {
            section: Section::Agents,
            field: String::from("hunger"),
        };
        assert_eq!(err.section(), Section::Agents);
        assert!(err.to_string().contains("hunger"));
    }
}
