pub mod auth;
pub mod cv;
pub mod module;
pub mod overview;
pub mod promo;
pub mod promo_module;
pub mod promo_selection;
pub mod relation;
pub mod teacher;
pub mod users;
