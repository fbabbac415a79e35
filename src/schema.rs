diesel::table! {
    users (id) {
        id -> Int4,
        username -> Text,
        password -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    shows (id) {
        id -> Int4,
        title -> Text,
        genre -> Text,
        rating -> Float8,
        status -> Text,
        user_id -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(shows -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(shows, users);
