pub mod flows;
pub mod identity;
pub mod state;
