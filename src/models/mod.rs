pub mod city_change;
pub mod outcome;
pub mod table;
pub mod window;

pub use city_change::CityAqiChange;
pub use outcome::StepOutcome;
pub use table::{Column, Table};
pub use window::DateWindow;
