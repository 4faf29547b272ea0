//! Drag-and-drop state machine.
//!
//! The controller is either idle or tracking exactly one drag session.
//! Transitions are driven by discrete host events; malformed sequences
//! (a drop with nothing being dragged, a second end event) are ignored
//! rather than reported.

use crate::domain::{Board, ColumnId, TaskId, TaskMove};
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, trace, warn};

pub mod preview;

pub use preview::{DragPreview, PreviewGuard};

/// Anything that can commit a task move on drop
pub trait TaskMover {
    fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        new_index: usize,
    ) -> Result<TaskMove>;
}

impl TaskMover for Board {
    fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        new_index: usize,
    ) -> Result<TaskMove> {
        Board::move_task(self, task_id, from, to, new_index)
    }
}

/// An in-progress drag gesture
#[derive(Debug)]
pub struct DragSession {
    task_id: TaskId,
    source_column: ColumnId,
    source_index: usize,
    candidate_column: Option<ColumnId>,
    candidate_index: Option<usize>,
    preview: PreviewGuard,
}

impl DragSession {
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn source_column(&self) -> &ColumnId {
        &self.source_column
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn candidate_column(&self) -> Option<&ColumnId> {
        self.candidate_column.as_ref()
    }

    pub fn candidate_index(&self) -> Option<usize> {
        self.candidate_index
    }

    /// Index to commit for a drop on `column_id` at the drop site's `index`.
    ///
    /// The last drag-over position wins when it was over the same column.
    fn target_index(&self, column_id: &ColumnId, index: usize) -> usize {
        match (&self.candidate_column, self.candidate_index) {
            (Some(candidate), Some(candidate_index)) if candidate == column_id => candidate_index,
            _ => index,
        }
    }
}

#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Read-only view of the drag state, for highlighting drop targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DragSnapshot {
    pub is_dragging: bool,
    pub dragged_id: Option<TaskId>,
    pub source_column: Option<ColumnId>,
    pub source_index: Option<usize>,
    pub drop_target: Option<ColumnId>,
    pub drop_index: Option<usize>,
}

impl DragSnapshot {
    pub fn is_drop_target(&self, column_id: &ColumnId) -> bool {
        self.drop_target.as_ref() == Some(column_id)
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Begins dragging `task_id` from `column_id` at `index`.
    ///
    /// An unfinished session is abandoned first; the board is not touched.
    pub fn drag_start(
        &mut self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
        preview: Option<Box<dyn DragPreview>>,
    ) {
        if let DragState::Dragging(mut stale) = std::mem::take(&mut self.state) {
            warn!(task_id = %stale.task_id, "Abandoning unfinished drag");
            stale.preview.release();
        }

        debug!(task_id = %task_id, column = %column_id, index, "Drag started");
        self.state = DragState::Dragging(DragSession {
            task_id,
            source_column: column_id,
            source_index: index,
            candidate_column: None,
            candidate_index: None,
            preview: PreviewGuard::from(preview),
        });
    }

    /// Records the drop zone currently under the pointer
    pub fn drag_over(&mut self, column_id: ColumnId, index: usize) {
        match &mut self.state {
            DragState::Dragging(session) => {
                trace!(column = %column_id, index, "Drag over");
                session.candidate_column = Some(column_id);
                session.candidate_index = Some(index);
            }
            DragState::Idle => trace!("Ignoring drag-over without an active drag"),
        }
    }

    /// Commits the active drag as a move onto `column_id`.
    ///
    /// Returns the committed move. A drop with no active session, or one the
    /// mover rejects, returns `None`; either way the controller ends idle.
    pub fn drop<M>(&mut self, mover: &mut M, column_id: &ColumnId, index: usize) -> Option<TaskMove>
    where
        M: TaskMover + ?Sized,
    {
        let DragState::Dragging(mut session) = std::mem::take(&mut self.state) else {
            trace!("Ignoring drop without an active drag");
            return None;
        };

        let target_index = session.target_index(column_id, index);
        let result = mover.move_task(
            &session.task_id,
            &session.source_column,
            column_id,
            target_index,
        );
        session.preview.release();

        match result {
            Ok(moved) => {
                debug!(
                    task_id = %moved.task_id,
                    from = %moved.from,
                    to = %moved.to,
                    index = moved.index,
                    "Drop committed"
                );
                Some(moved)
            }
            Err(err) => {
                warn!(task_id = %session.task_id, error = %err, "Drop rejected");
                None
            }
        }
    }

    /// Drops onto the empty area below a column's last task
    pub fn drop_at_end<M>(
        &mut self,
        mover: &mut M,
        column_id: &ColumnId,
        column_len: usize,
    ) -> Option<TaskMove>
    where
        M: TaskMover + ?Sized,
    {
        if let DragState::Dragging(session) = &mut self.state {
            session.candidate_column = None;
            session.candidate_index = None;
        }
        self.drop(mover, column_id, column_len)
    }

    /// Ends the drag without a drop; the board is never touched
    pub fn drag_end(&mut self) {
        if let DragState::Dragging(mut session) = std::mem::take(&mut self.state) {
            debug!(task_id = %session.task_id, "Drag cancelled");
            session.preview.release();
        }
    }

    pub fn snapshot(&self) -> DragSnapshot {
        match &self.state {
            DragState::Idle => DragSnapshot::default(),
            DragState::Dragging(session) => DragSnapshot {
                is_dragging: true,
                dragged_id: Some(session.task_id.clone()),
                source_column: Some(session.source_column.clone()),
                source_index: Some(session.source_index),
                drop_target: session.candidate_column.clone(),
                drop_index: session.candidate_index,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::preview::tests::CountingPreview;
    use super::*;
    use crate::domain::{BoardConfig, Column, Task};
    use crate::error::KanbanError;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::str::FromStr;

    fn col(id: &str) -> ColumnId {
        ColumnId::from_str(id).unwrap()
    }

    fn tid(id: &str) -> TaskId {
        TaskId::from_str(id).unwrap()
    }

    /// Records requested moves and accepts or rejects all of them
    #[derive(Default)]
    struct RecordingMover {
        calls: Vec<(TaskId, ColumnId, ColumnId, usize)>,
        reject: bool,
    }

    impl TaskMover for RecordingMover {
        fn move_task(
            &mut self,
            task_id: &TaskId,
            from: &ColumnId,
            to: &ColumnId,
            new_index: usize,
        ) -> Result<TaskMove> {
            self.calls
                .push((task_id.clone(), from.clone(), to.clone(), new_index));
            if self.reject {
                return Err(KanbanError::TaskNotFound(task_id.to_string()));
            }
            Ok(TaskMove {
                task_id: task_id.clone(),
                from: from.clone(),
                to: to.clone(),
                index: new_index,
            })
        }
    }

    fn board() -> Board {
        let config = BoardConfig {
            name: "Drag".to_string(),
            columns: vec![
                Column::new(col("todo"), "To Do", "#6b7280"),
                Column::new(col("done"), "Done", "#10b981"),
            ],
        };
        Board::with_tasks(
            config,
            vec![
                Task::new(tid("A"), "Task A", col("todo")),
                Task::new(tid("B"), "Task B", col("todo")),
            ],
        )
        .unwrap()
    }

    fn order(board: &Board, column: &str) -> Vec<String> {
        board
            .column(&col(column))
            .unwrap()
            .task_ids
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_starts_idle() {
        let controller = DragController::new();
        assert!(!controller.is_dragging());
        assert!(controller.session().is_none());
        assert_eq!(controller.snapshot(), DragSnapshot::default());
    }

    #[test]
    fn test_drag_start_then_end_leaves_board_unchanged() {
        let mut board = board();
        let before = serde_json::to_value(&board).unwrap();
        let releases = Rc::new(Cell::new(0));
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, Some(CountingPreview::boxed(&releases)));
        assert!(controller.is_dragging());
        controller.drag_over(col("done"), 0);
        controller.drag_end();

        assert!(!controller.is_dragging());
        assert_eq!(releases.get(), 1);
        assert_eq!(serde_json::to_value(&board).unwrap(), before);

        // The controller is reusable after a cancel
        controller.drag_start(tid("A"), col("todo"), 0, None);
        assert!(controller.drop(&mut board, &col("done"), 0).is_some());
    }

    #[test]
    fn test_drop_moves_task_on_board() {
        let mut board = board();
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, None);
        controller.drag_over(col("done"), 0);
        let moved = controller.drop(&mut board, &col("done"), 0).unwrap();

        assert_eq!(moved.to, col("done"));
        assert_eq!(order(&board, "todo"), vec!["B"]);
        assert_eq!(order(&board, "done"), vec!["A"]);
        assert_eq!(board.task(&tid("A")).unwrap().status, col("done"));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drop_prefers_candidate_index_for_same_column() {
        let mut mover = RecordingMover::default();
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, None);
        controller.drag_over(col("done"), 3);
        controller.drop(&mut mover, &col("done"), 7);

        assert_eq!(mover.calls, vec![(tid("A"), col("todo"), col("done"), 3)]);
    }

    #[test]
    fn test_drop_uses_site_index_for_other_column() {
        let mut mover = RecordingMover::default();
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, None);
        controller.drag_over(col("review"), 3);
        controller.drop(&mut mover, &col("done"), 7);

        controller.drag_start(tid("B"), col("todo"), 1, None);
        controller.drop(&mut mover, &col("done"), 2);

        assert_eq!(
            mover.calls,
            vec![
                (tid("A"), col("todo"), col("done"), 7),
                (tid("B"), col("todo"), col("done"), 2),
            ]
        );
    }

    #[test]
    fn test_drop_at_end_uses_column_length() {
        let mut board = board();
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, None);
        controller.drag_over(col("todo"), 0);
        let len = board.column(&col("todo")).unwrap().len();
        let moved = controller.drop_at_end(&mut board, &col("todo"), len).unwrap();

        assert_eq!(moved.index, 1);
        assert_eq!(order(&board, "todo"), vec!["B", "A"]);
    }

    #[test]
    fn test_drop_on_same_slot_is_noop() {
        let mut board = board();
        let mut controller = DragController::new();

        controller.drag_start(tid("B"), col("todo"), 1, None);
        controller.drag_over(col("todo"), 1);
        assert!(controller.drop(&mut board, &col("todo"), 1).is_some());

        assert_eq!(order(&board, "todo"), vec!["A", "B"]);
    }

    #[test]
    fn test_drop_without_session_is_noop() {
        let mut mover = RecordingMover::default();
        let mut controller = DragController::new();

        assert!(controller.drop(&mut mover, &col("done"), 0).is_none());
        controller.drag_over(col("done"), 0);
        controller.drag_end();

        assert!(mover.calls.is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_rejected_drop_is_swallowed() {
        let mut mover = RecordingMover {
            reject: true,
            ..RecordingMover::default()
        };
        let releases = Rc::new(Cell::new(0));
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, Some(CountingPreview::boxed(&releases)));
        assert!(controller.drop(&mut mover, &col("done"), 0).is_none());

        assert_eq!(mover.calls.len(), 1);
        assert!(!controller.is_dragging());
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_end_after_drop_is_noop() {
        let mut board = board();
        let releases = Rc::new(Cell::new(0));
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, Some(CountingPreview::boxed(&releases)));
        controller.drop(&mut board, &col("done"), 0);
        controller.drag_end();

        assert_eq!(releases.get(), 1);
        assert_eq!(order(&board, "done"), vec!["A"]);
    }

    #[test]
    fn test_second_drag_start_replaces_session() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut controller = DragController::new();

        controller.drag_start(tid("A"), col("todo"), 0, Some(CountingPreview::boxed(&first)));
        controller.drag_start(tid("B"), col("todo"), 1, Some(CountingPreview::boxed(&second)));

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        assert_eq!(controller.session().unwrap().task_id(), &tid("B"));

        controller.drag_end();
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_snapshot_tracks_drop_target() {
        let mut controller = DragController::new();
        controller.drag_start(tid("A"), col("todo"), 0, None);

        let snapshot = controller.snapshot();
        assert!(snapshot.is_dragging);
        assert_eq!(snapshot.dragged_id, Some(tid("A")));
        assert_eq!(snapshot.source_index, Some(0));
        assert!(snapshot.drop_target.is_none());

        controller.drag_over(col("done"), 2);
        let snapshot = controller.snapshot();
        assert!(snapshot.is_drop_target(&col("done")));
        assert!(!snapshot.is_drop_target(&col("todo")));
        assert_eq!(snapshot.drop_index, Some(2));
    }
}
