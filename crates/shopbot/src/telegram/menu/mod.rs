//! Shop menus: callback routing and screen delivery

mod callback_router;
mod helpers;

pub use callback_router::handle_shop_callback;
pub use helpers::{edit_screen, inline_keyboard, parse_mode, send_screen};
