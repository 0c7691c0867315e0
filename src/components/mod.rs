pub mod category_card;
pub mod model_autocomplete;
pub mod notification;
pub mod results_panel;
pub mod tank_card;
