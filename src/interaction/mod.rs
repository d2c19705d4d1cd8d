//! Pointer interaction: hover tracking, link activation, and the nav menu.

mod activation;
mod hover;
mod menu;

pub use activation::LinkOpener;
pub use hover::{
    apply_enter, apply_exit, HoverController, HoverState, HoverTransition,
};
pub use menu::NavMenu;
