pub mod alerts;
pub mod forecast_selector;
pub mod gameday;
pub mod impact;
pub mod stadium_validation;

pub use gameday::GamedayService;
pub use impact::ImpactAdvisor;
