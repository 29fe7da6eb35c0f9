pub mod reference;
pub mod time;
