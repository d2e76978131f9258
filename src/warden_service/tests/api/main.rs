mod admin;
mod auth;
mod helpers;
