pub mod contact;
pub mod csrf;
pub mod health;
pub mod listings;
