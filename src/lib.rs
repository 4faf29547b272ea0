//! # Kanban Core
//!
//! State, drag-and-drop and search logic for a kanban task board.
//!
//! Columns hold ordered task references, tasks carry their metadata, and
//! every change goes through a single [`BoardStore`]. A [`DragController`]
//! turns pointer events into moves, and [`BoardView`] gathers what a
//! renderer needs. Rendering, persistence and hosting are left to the
//! embedding application.

pub mod domain;
pub mod drag;
pub mod error;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Column, ColumnId, TaskMove},
    task::{Priority, Task, TaskDraft, TaskId, TaskUpdate},
    wip::WipLevel,
};
pub use drag::{DragController, DragPreview, DragSnapshot, TaskMover};
pub use error::{ErrorKind, KanbanError, Result};
pub use store::{BoardEvent, BoardObserver, BoardStore};
pub use view::BoardView;
