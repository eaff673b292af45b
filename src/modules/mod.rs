pub mod auth;
pub mod cart;
pub mod categories;
pub mod health;
pub mod products;
pub mod users;
