//! Diesel schema for task persistence.

diesel::table! {
    /// Owner-scoped task records; subtasks reference their parent row.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Parent task identifier for subtasks.
        parent_id -> Nullable<Uuid>,
        /// Trimmed task title.
        #[max_length = 80]
        title -> Varchar,
        /// Optional trimmed description.
        #[max_length = 280]
        description -> Nullable<Varchar>,
        /// Priority (`LOW`, `MEDIUM`, `HIGH`).
        #[max_length = 16]
        priority -> Varchar,
        /// Status (`PENDING`, `IN_PROGRESS`, `DONE`).
        #[max_length = 16]
        status -> Varchar,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
        /// Completion timestamp, present only for done tasks.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
