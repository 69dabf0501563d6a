pub mod editor;
pub mod error;
pub mod image;
pub mod login;
pub mod notice;
pub mod pages;
pub mod ports;
pub mod privacy;
pub mod profile_page;
pub mod router;
pub mod service;
pub mod shell;
pub mod signup;
