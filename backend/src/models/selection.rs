//! Channel selections made in the dashboard views.

use super::channel::Channel;

/// Error raised when a selection names a channel outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Unknown channel '{0}'")]
    UnknownChannel(String),
}

/// Ordered set of channel columns chosen in one view.
///
/// Order follows the request; repeated columns keep their first position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    columns: Vec<String>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every channel, in configuration order.
    pub fn all(channels: &[Channel]) -> Self {
        Self::first(channels, channels.len())
    }

    /// The first `n` channels, in configuration order.
    pub fn first(channels: &[Channel], n: usize) -> Self {
        Self {
            columns: channels.iter().take(n).map(|c| c.column.clone()).collect(),
        }
    }

    /// Validate columns against the channel set.
    pub fn from_columns<I, S>(columns: I, channels: &[Channel]) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        for column in columns {
            let column = column.as_ref();
            if !channels.iter().any(|c| c.column == column) {
                return Err(SelectionError::UnknownChannel(column.to_string()));
            }
            if !selected.iter().any(|s| s == column) {
                selected.push(column.to_string());
            }
        }
        Ok(Self { columns: selected })
    }

    /// Parse a comma-separated list such as `TempC_target_1331,TempC_target_1370`.
    ///
    /// Blank entries are ignored, so an empty string is the empty selection.
    pub fn parse(raw: &str, channels: &[Channel]) -> Result<Self, SelectionError> {
        Self::from_columns(
            raw.split(',').map(str::trim).filter(|s| !s.is_empty()),
            channels,
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
