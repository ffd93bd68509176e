mod popup;

pub use popup::Popup;
