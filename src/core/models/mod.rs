pub mod audit;
pub mod budget;
pub mod expense;
pub mod group;
pub mod message;
pub mod split_bill;
pub mod user;
