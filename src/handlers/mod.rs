pub mod auth;
pub mod broadcast;
pub mod classes;
pub mod files;
pub mod homework;
pub mod modes;
pub mod rebuses;
pub mod schedule;
pub mod stats;
pub mod users;
pub mod utils;
