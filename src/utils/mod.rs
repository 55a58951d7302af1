pub mod js;
pub mod script;
