pub mod access;
pub mod catalog;
pub mod content;
pub mod errors;
pub mod identity;
pub mod order;
pub mod ports;
pub mod promo;
pub mod submission;
