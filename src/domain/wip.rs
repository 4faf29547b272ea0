use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the WIP limit at which a column starts warning
const WARNING_RATIO: f64 = 0.8;

/// Advisory fill level of a column relative to its WIP limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WipLevel {
    None,
    Warning,
    Error,
}

impl fmt::Display for WipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Computes the WIP warning level for a column holding `current_count` tasks.
///
/// A missing limit, or a limit of zero, never warns. The level is advisory:
/// nothing in the store refuses a move or create because of it.
///
/// # Examples
/// ```
/// use kanban_core::domain::wip::{wip_warning_level, WipLevel};
///
/// assert_eq!(wip_warning_level(8, Some(10)), WipLevel::Warning);
/// assert_eq!(wip_warning_level(10, Some(10)), WipLevel::Error);
/// assert_eq!(wip_warning_level(5, None), WipLevel::None);
/// ```
pub fn wip_warning_level(current_count: usize, max_tasks: Option<usize>) -> WipLevel {
    let max = match max_tasks {
        Some(max) if max > 0 => max,
        _ => return WipLevel::None,
    };

    if current_count >= max {
        WipLevel::Error
    } else if current_count as f64 >= max as f64 * WARNING_RATIO {
        WipLevel::Warning
    } else {
        WipLevel::None
    }
}

/// Checks whether a column holding `current_count` tasks is at or over its limit
pub fn is_wip_limit_reached(current_count: usize, max_tasks: Option<usize>) -> bool {
    matches!(max_tasks, Some(max) if max > 0 && current_count >= max)
}
