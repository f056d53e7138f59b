pub mod counter;
pub mod effects;
pub mod images;
pub mod nav_menu;
pub mod newsletter;
pub mod notification;
pub mod privacy;
pub mod reveal;
pub mod scroll_spy;
pub mod scroll_top;
pub mod smooth_scroll;
