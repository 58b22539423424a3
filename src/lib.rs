pub mod api;
pub mod cli;
pub mod dashboard;
pub mod error;
pub mod github;
pub mod health;
pub mod models;
pub mod normalize;
pub mod types;
pub mod vercel;
