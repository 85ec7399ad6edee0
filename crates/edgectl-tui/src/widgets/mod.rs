pub mod form;
pub mod picker;
pub mod spinner;
pub mod table;
pub mod toast;
