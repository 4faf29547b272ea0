use crate::domain::{Board, ColumnId, TaskId, TaskMove};
use serde::Serialize;

pub mod board_store;

pub use board_store::BoardStore;

/// A change the store has committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    TaskMoved(TaskMove),
    TaskCreated {
        task_id: TaskId,
        column_id: ColumnId,
    },
    TaskUpdated {
        task_id: TaskId,
    },
    TaskDeleted {
        task_id: TaskId,
        column_id: Option<ColumnId>,
    },
}

impl BoardEvent {
    /// The task the event is about
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskMoved(moved) => &moved.task_id,
            Self::TaskCreated { task_id, .. }
            | Self::TaskUpdated { task_id }
            | Self::TaskDeleted { task_id, .. } => task_id,
        }
    }
}

/// Collaborator told about every committed change, together with the
/// board as it stands afterwards
pub trait BoardObserver {
    fn on_change(&mut self, event: &BoardEvent, board: &Board);
}

impl<F> BoardObserver for F
where
    F: FnMut(&BoardEvent, &Board),
{
    fn on_change(&mut self, event: &BoardEvent, board: &Board) {
        self(event, board)
    }
}
