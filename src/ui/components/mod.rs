pub mod kpi_card;
pub mod option_card;
pub mod price_breakdown;
pub mod progress_bar;
pub mod toast;
