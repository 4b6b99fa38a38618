pub mod toast;
pub mod confirm;
pub mod alert;
