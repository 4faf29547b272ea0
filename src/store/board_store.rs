use crate::{
    domain::{Board, BoardConfig, ColumnId, Task, TaskDraft, TaskId, TaskMove, TaskUpdate},
    drag::TaskMover,
    error::{KanbanError, Result},
    store::{BoardEvent, BoardObserver},
};
use std::fmt;
use tracing::debug;

/// The single owner of board state.
///
/// All mutation goes through the operations below; each one either commits
/// fully and notifies every observer, or fails and leaves the board as it was.
pub struct BoardStore {
    board: Board,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            observers: Vec::new(),
        }
    }

    /// Creates a store over an empty board with the given columns
    pub fn from_config(config: BoardConfig) -> Result<Self> {
        Ok(Self::new(Board::new(config)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Registers a collaborator to be told about every committed change
    pub fn subscribe(&mut self, observer: impl BoardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        new_index: usize,
    ) -> Result<TaskMove> {
        let moved = self
            .board
            .move_task(task_id, from, to, new_index)
            .map_err(|err| {
                debug!(task_id = %task_id, error = %err, "Move rejected");
                err
            })?;

        debug!(
            task_id = %moved.task_id,
            from = %moved.from,
            to = %moved.to,
            index = moved.index,
            "Moved task"
        );
        self.notify(BoardEvent::TaskMoved(moved.clone()));
        Ok(moved)
    }

    pub fn create_task(&mut self, column_id: &ColumnId, draft: TaskDraft) -> Result<TaskId> {
        let task_id = self
            .board
            .create_task(column_id, draft)
            .map_err(|err| {
                debug!(column = %column_id, error = %err, "Create rejected");
                err
            })?;

        debug!(task_id = %task_id, column = %column_id, "Created task");
        self.notify(BoardEvent::TaskCreated {
            task_id: task_id.clone(),
            column_id: column_id.clone(),
        });
        Ok(task_id)
    }

    /// Creates a task in the board's first column
    pub fn create_task_in_first_column(&mut self, draft: TaskDraft) -> Result<TaskId> {
        let column_id = self
            .board
            .default_column_id()
            .cloned()
            .ok_or_else(|| KanbanError::ConfigError("board has no columns".to_string()))?;
        self.create_task(&column_id, draft)
    }

    pub fn update_task(&mut self, task_id: &TaskId, update: &TaskUpdate) -> Result<()> {
        self.board
            .update_task(task_id, update)
            .map_err(|err| {
                debug!(task_id = %task_id, error = %err, "Update rejected");
                err
            })?;

        debug!(task_id = %task_id, status = ?update.status, "Updated task");
        self.notify(BoardEvent::TaskUpdated {
            task_id: task_id.clone(),
        });
        Ok(())
    }

    /// Deletes a task; deleting an unknown or already-deleted task does nothing
    pub fn delete_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let column_id = self.board.column_of(task_id).map(|col| col.id.clone());
        let Some(removed) = self.board.delete_task(task_id) else {
            debug!(task_id = %task_id, "Delete of absent task ignored");
            return None;
        };

        debug!(task_id = %task_id, "Deleted task");
        self.notify(BoardEvent::TaskDeleted {
            task_id: task_id.clone(),
            column_id,
        });
        Some(removed)
    }

    fn notify(&mut self, event: BoardEvent) {
        for observer in &mut self.observers {
            observer.on_change(&event, &self.board);
        }
    }
}

impl TaskMover for BoardStore {
    fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        new_index: usize,
    ) -> Result<TaskMove> {
        BoardStore::move_task(self, task_id, from, to, new_index)
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardStore")
            .field("board", &self.board)
            .field("observers", &self.observers.len())
            .finish()
    }
}
