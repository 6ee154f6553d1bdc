//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Gym owners, the root of the ownership hierarchy.
    owners (id) {
        id -> Integer,
        name -> Text,
        email -> Text,
        role -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Managers, optionally attached to an owner.
    managers (id) {
        id -> Integer,
        name -> Text,
        email -> Text,
        role -> Text,
        created_at -> Timestamp,
        owner_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Gym facilities with their embedded address columns.
    facilities (id) {
        id -> Integer,
        name -> Text,
        street -> Text,
        city -> Text,
        state -> Text,
        state_abbr -> Text,
        zip_code -> Text,
        owner_id -> Integer,
        manager_id -> Nullable<Integer>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Trainers, optionally attached to an owner, manager, and facility.
    trainers (id) {
        id -> Integer,
        name -> Text,
        email -> Nullable<Text>,
        bio -> Nullable<Text>,
        role -> Text,
        created_at -> Timestamp,
        employment_date -> Timestamp,
        owner_id -> Nullable<Integer>,
        manager_id -> Nullable<Integer>,
        facility_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Staff members, always attached to a facility.
    staff (id) {
        id -> Integer,
        name -> Text,
        email -> Text,
        bio -> Nullable<Text>,
        role -> Text,
        created_at -> Timestamp,
        employment_date -> Timestamp,
        owner_id -> Nullable<Integer>,
        manager_id -> Nullable<Integer>,
        facility_id -> Integer,
    }
}

diesel::joinable!(managers -> owners (owner_id));
diesel::joinable!(facilities -> owners (owner_id));
diesel::joinable!(facilities -> managers (manager_id));
diesel::joinable!(trainers -> owners (owner_id));
diesel::joinable!(trainers -> managers (manager_id));
diesel::joinable!(trainers -> facilities (facility_id));
diesel::joinable!(staff -> owners (owner_id));
diesel::joinable!(staff -> managers (manager_id));
diesel::joinable!(staff -> facilities (facility_id));

diesel::allow_tables_to_appear_in_same_query!(owners, managers, facilities, trainers, staff);
