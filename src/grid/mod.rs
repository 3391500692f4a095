pub mod action;
pub mod cell;
pub mod layout;
