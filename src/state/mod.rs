// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod notices;
pub mod reactivity;

pub use notices::{Notice, NoticeBoard, NoticeLevel};
pub use reactivity::{ReactiveState, Signal, Subscription};
