pub mod board;
pub mod filter;
pub mod reorder;
pub mod task;
pub mod wip;

pub use board::{Board, BoardConfig, Column, ColumnId, TaskMove};
pub use filter::{filter_tasks, matches_query};
pub use reorder::{move_between_sequences, reorder_within_column};
pub use task::{Priority, Task, TaskDraft, TaskId, TaskUpdate};
pub use wip::{is_wip_limit_reached, wip_warning_level, WipLevel};
