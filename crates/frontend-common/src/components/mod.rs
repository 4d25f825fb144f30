mod spinner;
mod status_card;

pub use spinner::LoadingSpinner;
pub use status_card::StatusCard;
