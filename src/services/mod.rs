// Services layer - Pure logic shared by the coordinators
pub mod validation;
pub mod view_renderer;

pub use validation::{validate, Validated, Violation, CATEGORY_RULES, ITEM_RULES};
pub use view_renderer::ViewRenderer;
