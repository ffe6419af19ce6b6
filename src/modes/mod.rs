/// Interactive catalog browser
pub mod browser;
