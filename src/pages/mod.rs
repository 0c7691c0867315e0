pub mod home;
pub mod tank_search;
