//! Domain services for the synthdb API

pub mod accept;
pub mod mailer;
