//! Diesel schema for board persistence.

diesel::table! {
    /// Projects with their optional lane configuration.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Theme colour shown by clients.
        #[max_length = 32]
        theme_color -> Varchar,
        /// Ordered lane drafts, null when never configured.
        lanes -> Nullable<Jsonb>,
        /// Creating user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project memberships with roles.
    project_members (id) {
        /// Membership identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Member user.
        user_id -> Uuid,
        /// Member role.
        #[max_length = 16]
        role -> Varchar,
        /// User who added the member.
        added_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Description.
        description -> Text,
        /// Lane identifier.
        #[max_length = 64]
        status -> Varchar,
        /// Priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Assigned user.
        assignee_id -> Uuid,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Tags.
        tags -> Array<Text>,
        /// Estimate in points.
        estimate_points -> Int4,
        /// Sort key within the lane.
        sort_order -> Int8,
        /// Insertion sequence used to break sort key ties.
        seq -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User directory.
    profiles (user_id) {
        /// User identifier.
        user_id -> Uuid,
        /// Normalised email address.
        #[max_length = 320]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional avatar URL.
        avatar_url -> Nullable<Text>,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(tasks -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(projects, project_members, tasks, profiles,);
