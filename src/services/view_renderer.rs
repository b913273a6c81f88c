use minijinja::Environment;
use serde::Serialize;

use crate::errors::internal::ViewError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("category_list.html", include_str!("../../templates/category_list.html")),
    ("category_form.html", include_str!("../../templates/category_form.html")),
    ("item_list.html", include_str!("../../templates/item_list.html")),
    ("item_form.html", include_str!("../../templates/item_form.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

/// Renders a named view with a serializable payload
///
/// Templates are compiled into the binary. `.html` names get minijinja's
/// HTML auto-escaping.
pub struct ViewRenderer {
    env: Environment<'static>,
}

impl ViewRenderer {
    pub fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| ViewError::Render {
                    view: name.to_string(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    pub fn render<T: Serialize>(&self, view: &str, data: &T) -> Result<String, ViewError> {
        let render_error = |source| ViewError::Render {
            view: view.to_string(),
            source,
        };

        self.env
            .get_template(view)
            .map_err(render_error)?
            .render(data)
            .map_err(render_error)
    }
}

impl std::fmt::Debug for ViewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRenderer")
            .field("templates", &TEMPLATES.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dto::views::{DashboardView, ErrorView};

    #[test]
    fn test_all_templates_compile() {
        assert!(ViewRenderer::new().is_ok());
    }

    #[test]
    fn test_render_dashboard_counts() {
        let renderer = ViewRenderer::new().unwrap();

        let html = renderer
            .render(
                "index.html",
                &DashboardView {
                    count_item: 7,
                    count_category: 2,
                },
            )
            .unwrap();

        assert!(html.contains(r#"<strong id="count-item">7</strong>"#));
        assert!(html.contains(r#"<strong id="count-category">2</strong>"#));
    }

    #[test]
    fn test_error_detail_is_autoescaped() {
        let renderer = ViewRenderer::new().unwrap();

        let html = renderer
            .render(
                "error.html",
                &ErrorView {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                    detail: Some("<script>".to_string()),
                },
            )
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        let renderer = ViewRenderer::new().unwrap();

        let result = renderer.render("missing.html", &());

        assert!(matches!(result, Err(ViewError::Render { view, .. }) if view == "missing.html"));
    }
}
