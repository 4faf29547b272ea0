use crate::domain::filter::matches_query;
use crate::domain::reorder::{move_between_sequences, reorder_within_column};
use crate::domain::task::{Task, TaskDraft, TaskId, TaskUpdate};
use crate::domain::wip::{is_wip_limit_reached, wip_warning_level, WipLevel};
use crate::error::{KanbanError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::{fmt, str::FromStr};

/// Identifier of a board column; a task's status is the id of its column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ColumnId(String);

impl ColumnId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ColumnId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KanbanError::ConfigError(
                "column ID must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for ColumnId {
    type Error = KanbanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kanban board column and the authoritative order of its tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<usize>,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: color.into(),
            max_tasks: None,
            task_ids: Vec::new(),
        }
    }

    /// Sets the advisory WIP limit
    pub fn with_limit(mut self, max_tasks: usize) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    /// Position of a task within this column, if it is here
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub fn wip_level(&self) -> WipLevel {
        wip_warning_level(self.len(), self.max_tasks)
    }

    pub fn is_full(&self) -> bool {
        is_wip_limit_reached(self.len(), self.max_tasks)
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
}

impl BoardConfig {
    /// Parses a board configuration from JSON and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the column layout can back a board.
    ///
    /// Requires at least one column, unique column ids, and no pre-filled
    /// task sequences (tasks are seeded through [`Board::with_tasks`]).
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(KanbanError::ConfigError(
                "board needs at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(&column.id) {
                return Err(KanbanError::DuplicateColumnId(column.id.to_string()));
            }
            if !column.task_ids.is_empty() {
                return Err(KanbanError::ConfigError(format!(
                    "column {} lists task IDs; seed tasks through the board instead",
                    column.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let column = |id: &str, title: &str, color: &str| {
            Column::new(ColumnId(id.to_string()), title, color)
        };

        Self {
            name: "Default Board".to_string(),
            columns: vec![
                column("todo", "To Do", "#6b7280").with_limit(10),
                column("in-progress", "In Progress", "#3b82f6").with_limit(5),
                column("review", "Review", "#f59e0b").with_limit(3),
                column("done", "Done", "#10b981"),
            ],
        }
    }
}

/// A committed move of one task, with the index it actually landed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMove {
    pub task_id: TaskId,
    pub from: ColumnId,
    pub to: ColumnId,
    pub index: usize,
}

impl TaskMove {
    pub fn is_cross_column(&self) -> bool {
        self.from != self.to
    }
}

/// Kanban board state: ordered columns plus the task records they reference.
///
/// Every mutating operation validates before it writes, so a rejected call
/// leaves the board exactly as it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    name: String,
    columns: Vec<Column>,
    tasks: HashMap<TaskId, Task>,
    next_task_number: u32,
}

impl Board {
    /// Creates an empty board from a validated configuration
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: config.name,
            columns: config.columns,
            tasks: HashMap::new(),
            next_task_number: 1,
        })
    }

    /// Creates a board and places each task at the end of its status column
    pub fn with_tasks(config: BoardConfig, tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        let mut board = Self::new(config)?;
        for task in tasks {
            if board.tasks.contains_key(&task.id) {
                return Err(KanbanError::DuplicateTaskId(task.id.to_string()));
            }
            let column_index = board
                .column_index(&task.status)
                .map_err(|_| KanbanError::UnknownStatus(task.status.to_string()))?;
            board.columns[column_index].task_ids.push(task.id.clone());
            board.tasks.insert(task.id.clone(), task);
        }
        Ok(board)
    }

    /// Restores a board from JSON, rejecting state that breaks its invariants
    pub fn from_json(json: &str) -> Result<Self> {
        let board: Board = serde_json::from_str(json)?;
        board.check_invariants()?;
        Ok(board)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == column_id)
    }

    /// The column new tasks go to when none is named
    pub fn default_column_id(&self) -> Option<&ColumnId> {
        self.columns.first().map(|col| &col.id)
    }

    pub fn tasks(&self) -> &HashMap<TaskId, Task> {
        &self.tasks
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Finds the column whose sequence holds `task_id`
    pub fn column_of(&self, task_id: &TaskId) -> Option<&Column> {
        self.columns.iter().find(|col| col.contains(task_id))
    }

    /// Gets a column's tasks in display order
    pub fn tasks_in_column(&self, column_id: &ColumnId) -> Result<Vec<&Task>> {
        let column = self
            .column(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))?;

        Ok(column
            .task_ids
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect())
    }

    /// Gets a column's tasks in display order, keeping only search matches
    pub fn visible_tasks(&self, column_id: &ColumnId, query: &str) -> Result<Vec<&Task>> {
        let mut tasks = self.tasks_in_column(column_id)?;
        tasks.retain(|task| matches_query(task, query));
        Ok(tasks)
    }

    /// Moves a task within or between columns.
    ///
    /// `new_index` is clamped to the destination sequence; for a move within
    /// one column it indexes the sequence after the task has been removed.
    /// A cross-column move also sets the task's status to the destination.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        new_index: usize,
    ) -> Result<TaskMove> {
        let from_index = self.column_index(from)?;
        let to_index = self.column_index(to)?;
        let position = self.columns[from_index]
            .position(task_id)
            .ok_or_else(|| KanbanError::TaskNotInColumn {
                task: task_id.to_string(),
                column: from.to_string(),
            })?;
        if !self.tasks.contains_key(task_id) {
            return Err(KanbanError::TaskNotFound(task_id.to_string()));
        }

        let index = if from_index == to_index {
            let column = &mut self.columns[from_index];
            let index = new_index.min(column.len() - 1);
            column.task_ids = reorder_within_column(&column.task_ids, position, new_index);
            index
        } else {
            let (source, destination) = move_between_sequences(
                &self.columns[from_index].task_ids,
                &self.columns[to_index].task_ids,
                position,
                new_index,
            );
            let index = new_index.min(self.columns[to_index].len());
            self.columns[from_index].task_ids = source;
            self.columns[to_index].task_ids = destination;
            if let Some(task) = self.tasks.get_mut(task_id) {
                task.status = to.clone();
            }
            index
        };

        Ok(TaskMove {
            task_id: task_id.clone(),
            from: from.clone(),
            to: to.clone(),
            index,
        })
    }

    /// Creates a task at the end of `column_id` and returns its id.
    ///
    /// The draft's id is used when given; otherwise the next free `task-<n>`
    /// is assigned.
    pub fn create_task(&mut self, column_id: &ColumnId, mut draft: TaskDraft) -> Result<TaskId> {
        let column_index = self.column_index(column_id)?;

        let (task_id, next_number) = match draft.id.take() {
            Some(id) => {
                if self.tasks.contains_key(&id) {
                    return Err(KanbanError::DuplicateTaskId(id.to_string()));
                }
                (id, self.next_task_number)
            }
            None => self.peek_next_task_id(),
        };

        let task = draft.into_task(task_id.clone(), column_id.clone(), Utc::now())?;

        self.next_task_number = next_number;
        self.columns[column_index].task_ids.push(task_id.clone());
        self.tasks.insert(task_id.clone(), task);
        Ok(task_id)
    }

    /// Merges `update` into an existing task.
    ///
    /// A changed status must name an existing column; the task then moves to
    /// the end of that column so its record and placement stay in agreement.
    pub fn update_task(&mut self, task_id: &TaskId, update: &TaskUpdate) -> Result<()> {
        let current = self
            .tasks
            .get(task_id)
            .ok_or_else(|| KanbanError::TaskNotFound(task_id.to_string()))?;

        let relocation = match &update.status {
            Some(status) if status != &current.status => {
                let to_index = self
                    .column_index(status)
                    .map_err(|_| KanbanError::UnknownStatus(status.to_string()))?;
                let from_index = self
                    .columns
                    .iter()
                    .position(|col| col.contains(task_id))
                    .ok_or_else(|| {
                        KanbanError::InconsistentState(format!(
                            "task {} is not placed in any column",
                            task_id
                        ))
                    })?;
                Some((from_index, to_index))
            }
            _ => None,
        };

        let updated = update.apply_to(current)?;

        if let Some((from_index, to_index)) = relocation {
            self.columns[from_index].task_ids.retain(|id| id != task_id);
            self.columns[to_index].task_ids.push(task_id.clone());
        }
        self.tasks.insert(task_id.clone(), updated);
        Ok(())
    }

    /// Removes a task and its placement.
    ///
    /// Returns the removed task, or `None` if it was already gone.
    pub fn delete_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let removed = self.tasks.remove(task_id)?;
        for column in &mut self.columns {
            column.task_ids.retain(|id| id != task_id);
        }
        Some(removed)
    }

    /// Verifies that columns and task records agree.
    ///
    /// Every placed id must have a record whose status is its column, no id
    /// may be placed twice, and every record must be placed.
    pub fn check_invariants(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        let mut placed = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(KanbanError::DuplicateColumnId(column.id.to_string()));
            }
            for id in &column.task_ids {
                if !placed.insert(id) {
                    return Err(KanbanError::InconsistentState(format!(
                        "task {} is placed more than once",
                        id
                    )));
                }
                let task = self.tasks.get(id).ok_or_else(|| {
                    KanbanError::InconsistentState(format!(
                        "column {} references missing task {}",
                        column.id, id
                    ))
                })?;
                if task.status != column.id {
                    return Err(KanbanError::InconsistentState(format!(
                        "task {} has status {} but sits in column {}",
                        id, task.status, column.id
                    )));
                }
            }
        }

        if let Some(id) = self.tasks.keys().find(|id| !placed.contains(id)) {
            return Err(KanbanError::InconsistentState(format!(
                "task {} is not placed in any column",
                id
            )));
        }
        Ok(())
    }

    fn column_index(&self, column_id: &ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|col| &col.id == column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))
    }

    /// Finds the next unused generated id without committing the counter
    fn peek_next_task_id(&self) -> (TaskId, u32) {
        let mut number = self.next_task_number;
        loop {
            let id = TaskId::new(number);
            number += 1;
            if !self.tasks.contains_key(&id) {
                return (id, number);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        let config = BoardConfig::default();
        Self {
            name: config.name,
            columns: config.columns,
            tasks: HashMap::new(),
            next_task_number: 1,
        }
    }
}
