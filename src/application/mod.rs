pub mod account_service;
pub mod catalog_service;
pub mod content_service;
pub mod order_service;
pub mod passwords;
pub mod promo_service;
