//! Render-ready snapshot of the board for a view layer.
//!
//! Nothing here draws anything; it gathers what a renderer needs per column
//! (visible tasks, WIP level, drop-target highlighting) into one
//! serializable value.

use crate::domain::{filter_tasks, Board, ColumnId, Task, WipLevel};
use crate::drag::DragSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView<'a> {
    pub id: &'a ColumnId,
    pub title: &'a str,
    pub color: &'a str,
    pub max_tasks: Option<usize>,
    /// Tasks in the column regardless of the search query
    pub task_count: usize,
    pub wip_level: WipLevel,
    pub is_drop_target: bool,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView<'a> {
    pub name: &'a str,
    pub query: &'a str,
    pub columns: Vec<ColumnView<'a>>,
    pub drag: DragSnapshot,
    /// Every task matching the query, across all columns in board order
    pub matching_tasks: Vec<&'a Task>,
}

impl<'a> BoardView<'a> {
    pub fn build(board: &'a Board, drag: DragSnapshot, query: &'a str) -> Self {
        let columns: Vec<ColumnView<'a>> = board
            .columns()
            .iter()
            .map(|column| {
                let in_order = column.task_ids.iter().filter_map(|id| board.task(id));
                ColumnView {
                    id: &column.id,
                    title: &column.title,
                    color: &column.color,
                    max_tasks: column.max_tasks,
                    task_count: column.len(),
                    wip_level: column.wip_level(),
                    is_drop_target: drag.is_drop_target(&column.id),
                    tasks: filter_tasks(in_order, query),
                }
            })
            .collect();

        let matching_tasks = columns
            .iter()
            .flat_map(|column| column.tasks.iter().copied())
            .collect();

        Self {
            name: board.name(),
            query,
            columns,
            drag,
            matching_tasks,
        }
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&ColumnView<'a>> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardConfig, Priority, TaskDraft};
    use crate::drag::DragController;
    use crate::store::BoardStore;

    fn populated_store() -> BoardStore {
        let mut store = BoardStore::default();
        let todo = store.board().default_column_id().cloned().unwrap();
        store
            .create_task(
                &todo,
                TaskDraft::new("Implement drag and drop")
                    .with_priority(Priority::High)
                    .with_tags(["frontend", "feature"]),
            )
            .unwrap();
        store
            .create_task(
                &todo,
                TaskDraft::new("Design task modal").with_assignee("Jane Smith"),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_view_without_query_shows_everything() {
        let store = populated_store();
        let view = BoardView::build(store.board(), DragSnapshot::default(), "");

        assert_eq!(view.columns.len(), BoardConfig::default().columns.len());
        assert_eq!(view.columns[0].tasks.len(), 2);
        assert_eq!(view.columns[0].task_count, 2);
        assert_eq!(view.matching_tasks.len(), 2);
        assert!(view.columns.iter().all(|c| !c.is_drop_target));
    }

    #[test]
    fn test_view_filters_but_keeps_counts() {
        let store = populated_store();
        let view = BoardView::build(store.board(), DragSnapshot::default(), "jane");

        let todo = &view.columns[0];
        assert_eq!(todo.tasks.len(), 1);
        assert_eq!(todo.tasks[0].title, "Design task modal");
        assert_eq!(todo.task_count, 2);
        assert_eq!(view.matching_tasks.len(), 1);
    }

    #[test]
    fn test_view_highlights_drop_target() {
        let store = populated_store();
        let first = store.board().tasks_in_column(&store.board().columns()[0].id).unwrap()[0]
            .id
            .clone();
        let review = store.board().columns()[2].id.clone();

        let mut controller = DragController::new();
        controller.drag_start(first, store.board().columns()[0].id.clone(), 0, None);
        controller.drag_over(review.clone(), 0);

        let view = BoardView::build(store.board(), controller.snapshot(), "");
        assert!(view.column(&review).unwrap().is_drop_target);
        assert!(view.drag.is_dragging);
        assert_eq!(view.columns.iter().filter(|c| c.is_drop_target).count(), 1);
    }

    #[test]
    fn test_view_serializes() {
        let store = populated_store();
        let view = BoardView::build(store.board(), DragSnapshot::default(), "");

        let json: serde_json::Value = serde_json::from_str(&view.to_json().unwrap()).unwrap();
        assert_eq!(json["columns"][0]["id"], "todo");
        assert_eq!(json["columns"][0]["wip_level"], "none");
        assert_eq!(json["columns"][0]["tasks"][0]["priority"], "high");
        assert_eq!(json["drag"]["is_dragging"], false);
    }
}
