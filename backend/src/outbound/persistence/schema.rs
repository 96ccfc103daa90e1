//! Diesel table definitions matching the embedded migrations.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Users who can enroll in lessons.
    users (id) {
        id -> Int8,
        display_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teachers who can be assigned to lessons.
    teachers (id) {
        id -> Int8,
        display_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled lessons.
    ///
    /// `teacher_id` is nulled when the teacher row is removed.
    lessons (id) {
        id -> Int8,
        title -> Text,
        description -> Text,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        teacher_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        /// Maintained by the `lessons_touch_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many link between lessons and users.
    ///
    /// Rows cascade away with either side.
    lesson_enrollments (lesson_id, user_id) {
        lesson_id -> Int8,
        user_id -> Int8,
        enrolled_at -> Timestamptz,
    }
}

diesel::joinable!(lessons -> teachers (teacher_id));
diesel::joinable!(lesson_enrollments -> lessons (lesson_id));
diesel::joinable!(lesson_enrollments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(lesson_enrollments, lessons, teachers, users,);
